//! Collaborator seams
//!
//! The core owns the order/shift logic and nothing else; everything at the
//! boundary - wall-clock time, the product catalog, durable storage, user
//! toasts, the cashier's shift ledger - is injected behind one of these
//! traits. Stores are constructed with their collaborators and passed by
//! reference, so tests run against fresh instances with fixed clocks and
//! canned catalogs.

use std::collections::HashMap;

use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::event::PaymentRecorded;

use crate::persist::PersistError;
use crate::shifts::ShiftError;

// ============================================================================
// Clock
// ============================================================================

/// Wall-clock source, injectable for testability.
pub trait Clock: Send + Sync {
    /// Current time as Unix milliseconds.
    fn now_millis(&self) -> i64;
}

/// System UTC clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        shared::util::now_millis()
    }
}

// ============================================================================
// Price lookup
// ============================================================================

/// Product catalog seam: resolves a product name to its unit price.
///
/// Returns `None` for unknown names; the money layer prices those at zero
/// (and logs the lookup miss) rather than failing the calculation.
pub trait PriceLookup: Send + Sync {
    fn price_of(&self, name: &str) -> Option<Decimal>;
}

/// Fixed in-memory catalog
///
/// Enough for tests and for front-ends that push their product list into
/// the core session at startup.
#[derive(Default)]
pub struct StaticCatalog {
    prices: HashMap<String, Decimal>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, name: impl Into<String>, price: Decimal) -> Self {
        self.prices.insert(name.into(), price);
        self
    }
}

impl PriceLookup for StaticCatalog {
    fn price_of(&self, name: &str) -> Option<Decimal> {
        self.prices.get(name).copied()
    }
}

// ============================================================================
// Key-value persistence
// ============================================================================

/// Opaque key-value persistence seam (localStorage-shaped).
///
/// The core only ever writes JSON strings through it; the backing medium
/// and its failure modes belong to the collaborator.
pub trait KvStore: Send + Sync {
    fn save(&self, key: &str, value: &str) -> Result<(), PersistError>;
    fn load(&self, key: &str) -> Result<Option<String>, PersistError>;
}

/// In-memory key-value store
#[derive(Default)]
pub struct MemoryKv {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn save(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.read().get(key).cloned())
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// Severity of a user-visible notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warn,
    Error,
}

/// User-visible toast sink, fire-and-forget.
///
/// Never consulted for control flow; a sink that drops every message is a
/// valid implementation.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, level: NoticeLevel);
}

/// Sink that discards every notice
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _message: &str, _level: NoticeLevel) {}
}

// ============================================================================
// Payment sink
// ============================================================================

/// Consumer of settled payments.
///
/// Implemented by the shift store; the order store delivers every
/// `PaymentRecorded` through this seam before the order is marked paid, so
/// a rejection (no active shift) fails the whole settlement instead of
/// losing the payment from reconciliation.
pub trait PaymentSink: Send + Sync {
    fn on_payment_recorded(&self, event: &PaymentRecorded) -> Result<(), ShiftError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_catalog_resolves_known_names_only() {
        let catalog = StaticCatalog::new().with_price("X-Bacon", Decimal::new(2090, 2));
        assert_eq!(catalog.price_of("X-Bacon"), Some(Decimal::new(2090, 2)));
        assert_eq!(catalog.price_of("X-Tudo"), None);
    }

    #[test]
    fn memory_kv_round_trips() {
        let kv = MemoryKv::new();
        assert_eq!(kv.load("missing").unwrap(), None);
        kv.save("k", "{\"a\":1}").unwrap();
        assert_eq!(kv.load("k").unwrap().as_deref(), Some("{\"a\":1}"));
        kv.save("k", "{}").unwrap();
        assert_eq!(kv.load("k").unwrap().as_deref(), Some("{}"));
    }
}
