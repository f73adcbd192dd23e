//! Comanda POS core
//!
//! The order lifecycle and cash-shift reconciliation engine behind a
//! restaurant point-of-sale front-end:
//!
//! - **orders**: the [`OrderStore`] - order identity, item merging, the
//!   kitchen state machine, and payment recording
//! - **shifts**: the [`ShiftStore`] - at most one active drawer session,
//!   payment accumulation, closing reconciliation
//! - **money**: decimal currency arithmetic and order totals
//! - **traits**: collaborator seams (clock, price lookup, key-value
//!   persistence, notification sink)
//! - **persist**: JSON snapshot round-trip through the key-value seam
//! - **receipt**: receipt value object for the printing collaborator
//!
//! # Control Flow
//!
//! ```text
//! UI ──createOrder──▶ OrderStore ──┐
//! KDS ─advance──────▶ OrderStore   ├─▶ ChangeEvent ─▶ listeners (UI, persistence)
//! Cashier ─payment──▶ OrderStore ──┘
//!                         │ PaymentRecorded (synchronous, before return)
//!                         ▼
//!                     ShiftStore ──▶ running totals ──▶ close reconciliation
//! ```
//!
//! Everything is synchronous and in-memory: one logical thread of control
//! mutates the stores, listeners observe completed mutations, and the two
//! stores stay consistent by sequential causality rather than transactions.

pub mod events;
pub mod money;
pub mod orders;
pub mod persist;
pub mod receipt;
pub mod shifts;
pub mod traits;
pub mod validate;

// Re-exports
pub use orders::{NewOrder, OrderError, OrderFilter, OrderStore};
pub use persist::{PersistError, PosSnapshot};
pub use receipt::{Receipt, ReceiptLine, ReceiptPrinter};
pub use shifts::{ShiftError, ShiftStore};
pub use traits::{
    Clock, KvStore, MemoryKv, NoticeLevel, NotificationSink, NullSink, PaymentSink, PriceLookup,
    StaticCatalog, SystemClock,
};

// Re-export the data model for convenience
pub use shared::event::{ChangeEvent, PaymentRecorded};
pub use shared::models::{
    DeliveryInfo, KitchenState, Order, OrderItem, OrderType, PaymentMethod, PaymentState, Shift,
    ShiftClose, ShiftOpen, ShiftStatus,
};
