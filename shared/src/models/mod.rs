//! Data models

pub mod order;
pub mod shift;

pub use order::{
    DeliveryInfo, KitchenState, Order, OrderItem, OrderType, PaymentMethod, PaymentState,
};
pub use shift::{Shift, ShiftClose, ShiftOpen, ShiftStatus};
