//! Stock engine error model.

use thiserror::Error;

/// Result type used across the inventory engine.
pub type StockResult<T> = Result<T, StockError>;

/// Engine-level error.
///
/// Every public operation either succeeds or returns one of these kinds.
/// "Zero matches" from a search is never an error, and deleting a missing
/// record is a successful no-op.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockError {
    /// Resolution or mutation by id/key found nothing.
    #[error("not found")]
    NotFound,

    /// A unique key is already taken by a non-mergeable record.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Input was rejected (non-positive amounts, malformed numbers, bad flags).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The backing store failed; surfaced as-is, never retried here.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl StockError {
    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::StoreUnavailable(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
