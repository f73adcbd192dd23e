//! Order management
//!
//! The [`OrderStore`] is the single authority for order identity, creation,
//! item mutation, and status transitions:
//!
//! 1. UI creates an order (kitchen `Pending`, payment `Unpaid`)
//! 2. Kitchen display advances the kitchen state along the linear chain
//! 3. Cashier records payment; the store synchronously hands the
//!    `PaymentRecorded` event to the shift ledger before marking the order
//!    paid, so the two stay consistent by sequential causality
//! 4. Every completed mutation fans out an `OrderChanged` notification

mod error;
mod store;

pub use error::OrderError;
pub use store::{NewOrder, OrderFilter, OrderStore};
