//! Snapshot persistence through the key-value seam
//!
//! The full order and shift collections round-trip as one JSON blob under
//! a single key. The core neither knows nor cares what backs the store
//! (localStorage, a file, a test map); it only guarantees the snapshot is
//! plain serializable data and that reloaded stores pick the id sequence
//! up where the snapshot left it.

use serde::{Deserialize, Serialize};
use shared::models::{Order, Shift};
use thiserror::Error;

use crate::orders::OrderStore;
use crate::shifts::ShiftStore;
use crate::traits::KvStore;

/// Key the session snapshot is stored under
pub const SNAPSHOT_KEY: &str = "comanda.snapshot";

/// Persistence errors
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Full session state as plain data
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PosSnapshot {
    pub orders: Vec<Order>,
    pub shifts: Vec<Shift>,
}

/// Capture both stores and write the snapshot.
pub fn save_snapshot(
    kv: &dyn KvStore,
    orders: &OrderStore,
    shifts: &ShiftStore,
) -> Result<(), PersistError> {
    let snapshot = PosSnapshot {
        orders: orders.snapshot(),
        shifts: shifts.snapshot(),
    };
    let json = serde_json::to_string(&snapshot)?;
    kv.save(SNAPSHOT_KEY, &json)?;
    tracing::debug!(
        orders = snapshot.orders.len(),
        shifts = snapshot.shifts.len(),
        "session snapshot saved"
    );
    Ok(())
}

/// Read the snapshot back, `None` when nothing was ever saved.
pub fn load_snapshot(kv: &dyn KvStore) -> Result<Option<PosSnapshot>, PersistError> {
    match kv.load(SNAPSHOT_KEY)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}
