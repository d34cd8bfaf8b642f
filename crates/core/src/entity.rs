//! Entity trait: identity + continuity across state changes.

use crate::id::RecordId;

/// Entity marker + minimal interface.
///
/// Every persisted inventory record is an entity whose id is assigned by the
/// store and never changes afterwards.
pub trait Entity: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Strongly-typed, store-assigned identifier.
    type Id: RecordId;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
