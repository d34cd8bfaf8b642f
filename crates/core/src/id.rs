//! Strongly-typed, store-assigned record identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::StockError;

/// Identifier assigned by a record store on insert.
///
/// Stores hand out raw ids from a per-table, monotonically increasing
/// counter, so ordering by id is the store's iteration order.
pub trait RecordId:
    Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug + core::fmt::Display + Send + Sync + 'static
{
    fn from_raw(raw: u64) -> Self;

    fn raw(&self) -> u64;
}

/// Identifier of a generic (hardware) stock item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

/// Identifier of a passive electrical component.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassiveId(u64);

/// Identifier of an active electrical component or assembly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveId(u64);

macro_rules! impl_record_id {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub fn get(&self) -> u64 {
                self.0
            }
        }

        impl RecordId for $t {
            fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            fn raw(&self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $t {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = StockError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| StockError::invalid(format!("{}: {}", $name, e)))?;
                Ok(Self(raw))
            }
        }
    };
}

impl_record_id!(ItemId, "ItemId");
impl_record_id!(PassiveId, "PassiveId");
impl_record_id!(ActiveId, "ActiveId");
