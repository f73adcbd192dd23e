//! Shift store errors

use thiserror::Error;

/// Typed failures of shift operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShiftError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("shift {0} not found or already closed")]
    NotFound(i64),

    #[error("conflict: {0}")]
    Conflict(String),

    /// A payment arrived with no active shift to book it against
    #[error("no active shift")]
    NoActiveShift,
}
