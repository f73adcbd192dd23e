//! Order store errors

use shared::models::KitchenState;
use thiserror::Error;

use crate::shifts::ShiftError;

/// Typed failures of order operations
///
/// Every expected business condition (empty cart, double payment, missing
/// shift) is a value the caller handles; nothing here panics.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("order not found: {0}")]
    NotFound(i64),

    #[error("invalid kitchen transition: {from} -> {to}")]
    InvalidTransition {
        from: KitchenState,
        to: KitchenState,
    },

    #[error("order {order_id} is not ready for payment (kitchen state {state})")]
    NotPayable {
        order_id: i64,
        state: KitchenState,
    },

    #[error("order {0} is already paid")]
    AlreadyPaid(i64),

    /// Shift-side rejection surfaced through payment recording
    #[error(transparent)]
    Shift(#[from] ShiftError),
}
