//! Value object trait: equality by value, not identity.
//!
//! Identity keys and storage locations are value objects: two keys built
//! from the same attributes are the same key, whichever record they came
//! from.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values.
/// To "modify" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct ItemKey {
///     name: String,
///     is_metric: bool,
///     size: String,
/// }
///
/// impl ValueObject for ItemKey {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
