//! Events emitted by the stores
//!
//! `PaymentRecorded` is the one business event: produced by the order store
//! when a cashier settles an order, consumed synchronously by the shift
//! store before the settlement call returns. `ChangeEvent` notifications
//! fan out to registered listeners (UI re-render, persistence snapshot)
//! after a mutation completes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::PaymentMethod;

/// A settled order payment - immutable audit record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecorded {
    /// Event unique ID
    pub event_id: String,
    /// Order this payment settled
    pub order_id: i64,
    /// Amount charged (order total at settlement time)
    pub amount: Decimal,
    pub method: PaymentMethod,
    /// Settlement time (Unix milliseconds)
    pub timestamp: i64,
}

impl PaymentRecorded {
    pub fn new(order_id: i64, amount: Decimal, method: PaymentMethod, timestamp: i64) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            order_id,
            amount,
            method,
            timestamp,
        }
    }
}

/// Store-change notification for registered listeners
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeEvent {
    OrderChanged { order_id: i64 },
    ShiftChanged { shift_id: i64 },
}
