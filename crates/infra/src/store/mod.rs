//! Record store boundary.
//!
//! The engine never talks to a database directly. It sees one
//! [`RecordStore`] per record type (bundled by [`InventoryStore`]) offering
//! point lookup, filtered scans, insert with a store-assigned id, update,
//! delete, and a call-scoped atomic read-modify-write ([`RecordStore::write`]).
//!
//! Any backend that can honour per-call atomicity fits: the in-memory
//! implementation here, an embedded database, or a remote one.

pub mod in_memory;

use std::sync::Arc;

use thiserror::Error;

use stockroom_core::{Entity, StockError};
use stockroom_inventory::{ActiveComponent, GenericItem, MultiplierSet, PassiveComponent};

pub use in_memory::{InMemoryInventoryStore, InMemoryMultiplierStore, InMemoryTable};

/// Backing store failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for StockError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Unavailable(msg) => StockError::StoreUnavailable(msg),
        }
    }
}

/// View of one table inside a store call.
///
/// Reads observe the transaction's own pending writes. Scans return records
/// in store iteration order (ascending id, i.e. insertion order).
pub trait Transaction<R: Entity> {
    fn get(&self, id: R::Id) -> Option<R>;

    fn scan(&self, filter: &dyn Fn(&R) -> bool) -> Vec<R>;

    /// Reserve the next id; the record is created by a later `put`.
    fn allocate_id(&mut self) -> R::Id;

    /// Insert or replace the record stored under `record.id()`.
    fn put(&mut self, record: R);

    /// Returns `false` when nothing was stored under `id`.
    fn remove(&mut self, id: R::Id) -> bool;
}

/// Table of records of one type.
pub trait RecordStore<R: Entity>: Send + Sync {
    /// Run `f` against a consistent snapshot.
    fn read<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&dyn Transaction<R>) -> T;

    /// Run `f` as one atomic read-modify-write.
    ///
    /// Writes become visible only if `f` returns `Ok`; on `Err` the table is
    /// left exactly as it was. Concurrent writers to the same table are
    /// serialised, so a read inside `f` cannot be invalidated before `f`'s
    /// writes land.
    fn write<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut dyn Transaction<R>) -> Result<T, E>;

    fn get(&self, id: R::Id) -> Result<Option<R>, StoreError> {
        self.read(|tx| tx.get(id))
    }

    fn scan<F>(&self, filter: F) -> Result<Vec<R>, StoreError>
    where
        F: Fn(&R) -> bool,
    {
        self.read(|tx| tx.scan(&filter))
    }

    fn list(&self) -> Result<Vec<R>, StoreError> {
        self.scan(|_| true)
    }

    fn insert<F>(&self, build: F) -> Result<R::Id, StoreError>
    where
        F: FnOnce(R::Id) -> R,
    {
        self.write(|tx| {
            let id = tx.allocate_id();
            tx.put(build(id));
            Ok::<_, StoreError>(id)
        })
    }

    /// Replace an existing record; returns `false` if its id is unknown.
    fn update(&self, record: R) -> Result<bool, StoreError> {
        self.write(|tx| {
            if tx.get(record.id()).is_none() {
                return Ok::<_, StoreError>(false);
            }
            tx.put(record);
            Ok(true)
        })
    }

    fn delete(&self, id: R::Id) -> Result<bool, StoreError> {
        self.write(|tx| Ok::<_, StoreError>(tx.remove(id)))
    }
}

/// Latest multiplier snapshot per component type.
pub trait MultiplierStore: Send + Sync {
    /// Replace the snapshot for `kind`; `None` drops it.
    fn replace(&self, kind: &str, set: Option<MultiplierSet>) -> Result<(), StoreError>;

    fn get(&self, kind: &str) -> Result<Option<MultiplierSet>, StoreError>;

    /// All snapshots ordered by type name.
    fn all(&self) -> Result<Vec<MultiplierSet>, StoreError>;
}

/// Everything the stock engine persists.
pub trait InventoryStore: Send + Sync + 'static {
    type Items: RecordStore<GenericItem>;
    type Passives: RecordStore<PassiveComponent>;
    type Actives: RecordStore<ActiveComponent>;
    type Multipliers: MultiplierStore;

    fn items(&self) -> &Self::Items;

    fn passives(&self) -> &Self::Passives;

    fn actives(&self) -> &Self::Actives;

    fn multipliers(&self) -> &Self::Multipliers;
}

impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    type Items = S::Items;
    type Passives = S::Passives;
    type Actives = S::Actives;
    type Multipliers = S::Multipliers;

    fn items(&self) -> &Self::Items {
        (**self).items()
    }

    fn passives(&self) -> &Self::Passives {
        (**self).passives()
    }

    fn actives(&self) -> &Self::Actives {
        (**self).actives()
    }

    fn multipliers(&self) -> &Self::Multipliers {
        (**self).multipliers()
    }
}
