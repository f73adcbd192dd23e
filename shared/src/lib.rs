//! Shared types for the Comanda POS core
//!
//! Data model used across the workspace: the order aggregate with its
//! kitchen/payment lifecycle, the cash-drawer shift aggregate, and the
//! payment/change events that flow between the stores.

pub mod event;
pub mod models;
pub mod util;

// Re-exports
pub use event::{ChangeEvent, PaymentRecorded};
pub use models::{
    DeliveryInfo, KitchenState, Order, OrderItem, OrderType, PaymentMethod, PaymentState, Shift,
    ShiftClose, ShiftOpen, ShiftStatus,
};
pub use serde::{Deserialize, Serialize};
