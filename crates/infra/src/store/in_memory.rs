use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::warn;

use stockroom_core::{Entity, RecordId};
use stockroom_inventory::{ActiveComponent, GenericItem, MultiplierSet, PassiveComponent};

use super::{InventoryStore, MultiplierStore, RecordStore, StoreError, Transaction};

#[derive(Debug)]
struct Rows<R: Entity> {
    rows: BTreeMap<R::Id, R>,
    last_id: u64,
}

/// Pending writes layered over the committed rows.
struct Staged<'a, R: Entity> {
    base: &'a Rows<R>,
    changes: BTreeMap<R::Id, Option<R>>,
    last_id: u64,
}

impl<'a, R: Entity> Staged<'a, R> {
    fn new(base: &'a Rows<R>) -> Self {
        Self {
            base,
            changes: BTreeMap::new(),
            last_id: base.last_id,
        }
    }
}

impl<R: Entity> Transaction<R> for Staged<'_, R> {
    fn get(&self, id: R::Id) -> Option<R> {
        match self.changes.get(&id) {
            Some(change) => change.clone(),
            None => self.base.rows.get(&id).cloned(),
        }
    }

    fn scan(&self, filter: &dyn Fn(&R) -> bool) -> Vec<R> {
        let committed = self.base.rows.iter().filter_map(|(id, row)| match self.changes.get(id) {
            Some(change) => change.as_ref(),
            None => Some(row),
        });
        let inserted = self
            .changes
            .iter()
            .filter(|(id, _)| !self.base.rows.contains_key(*id))
            .filter_map(|(_, change)| change.as_ref());

        // Fresh ids are always above every committed id, so appending keeps id order.
        committed
            .chain(inserted)
            .filter(|row| filter(row))
            .cloned()
            .collect()
    }

    fn allocate_id(&mut self) -> R::Id {
        self.last_id += 1;
        R::Id::from_raw(self.last_id)
    }

    fn put(&mut self, record: R) {
        self.changes.insert(record.id(), Some(record));
    }

    fn remove(&mut self, id: R::Id) -> bool {
        let existed = self.get(id).is_some();
        if existed {
            self.changes.insert(id, None);
        }
        existed
    }
}

/// In-memory table with staged, all-or-nothing writes.
///
/// Intended for tests/dev and single-process deployments. Ids start at 1
/// and are never reused.
#[derive(Debug)]
pub struct InMemoryTable<R: Entity> {
    inner: RwLock<Rows<R>>,
}

impl<R: Entity> InMemoryTable<R> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Rows {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl<R: Entity> Default for InMemoryTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    warn!("in-memory store lock poisoned");
    StoreError::Unavailable("lock poisoned".to_string())
}

impl<R: Entity> RecordStore<R> for InMemoryTable<R> {
    fn read<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&dyn Transaction<R>) -> T,
    {
        let rows = self.inner.read().map_err(|_| poisoned())?;
        let view = Staged::new(&rows);
        Ok(f(&view))
    }

    fn write<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut dyn Transaction<R>) -> Result<T, E>,
    {
        let mut rows = self.inner.write().map_err(|_| E::from(poisoned()))?;

        let mut staged = Staged::new(&rows);
        let out = f(&mut staged)?;
        let Staged { changes, last_id, .. } = staged;

        for (id, change) in changes {
            match change {
                Some(row) => {
                    rows.rows.insert(id, row);
                }
                None => {
                    rows.rows.remove(&id);
                }
            }
        }
        rows.last_id = last_id;

        Ok(out)
    }
}

/// In-memory multiplier snapshots keyed by component type.
#[derive(Debug, Default)]
pub struct InMemoryMultiplierStore {
    inner: RwLock<BTreeMap<String, MultiplierSet>>,
}

impl InMemoryMultiplierStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MultiplierStore for InMemoryMultiplierStore {
    fn replace(&self, kind: &str, set: Option<MultiplierSet>) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        match set {
            Some(set) => {
                map.insert(kind.to_string(), set);
            }
            None => {
                map.remove(kind);
            }
        }
        Ok(())
    }

    fn get(&self, kind: &str) -> Result<Option<MultiplierSet>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(kind).cloned())
    }

    fn all(&self) -> Result<Vec<MultiplierSet>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().cloned().collect())
    }
}

/// In-memory backend for the whole engine.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    items: InMemoryTable<GenericItem>,
    passives: InMemoryTable<PassiveComponent>,
    actives: InMemoryTable<ActiveComponent>,
    multipliers: InMemoryMultiplierStore,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InventoryStore for InMemoryInventoryStore {
    type Items = InMemoryTable<GenericItem>;
    type Passives = InMemoryTable<PassiveComponent>;
    type Actives = InMemoryTable<ActiveComponent>;
    type Multipliers = InMemoryMultiplierStore;

    fn items(&self) -> &Self::Items {
        &self.items
    }

    fn passives(&self) -> &Self::Passives {
        &self.passives
    }

    fn actives(&self) -> &Self::Actives {
        &self.actives
    }

    fn multipliers(&self) -> &Self::Multipliers {
        &self.multipliers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::{ItemId, StockError};
    use stockroom_inventory::{Location, NewGenericItem};

    fn item(name: &str, count: i64) -> impl FnOnce(ItemId) -> GenericItem {
        let new = NewGenericItem {
            name: name.to_string(),
            size: String::new(),
            is_metric: false,
            location: Location::default(),
            count,
            threshold: 0,
        };
        move |id| GenericItem::create(id, new)
    }

    #[test]
    fn ids_are_assigned_in_insertion_order() {
        let table = InMemoryTable::<GenericItem>::new();
        let a = table.insert(item("a", 1)).unwrap();
        let b = table.insert(item("b", 1)).unwrap();
        assert_eq!(a, ItemId::new(1));
        assert_eq!(b, ItemId::new(2));

        let names: Vec<String> = table.list().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let table = InMemoryTable::<GenericItem>::new();
        let a = table.insert(item("a", 1)).unwrap();
        assert!(table.delete(a).unwrap());
        assert!(!table.delete(a).unwrap());
        let b = table.insert(item("b", 1)).unwrap();
        assert_eq!(b, ItemId::new(2));
    }

    #[test]
    fn failed_write_leaves_table_unchanged() {
        let table = InMemoryTable::<GenericItem>::new();
        let a = table.insert(item("a", 5)).unwrap();

        let result = table.write(|tx| -> Result<(), StockError> {
            let mut row = tx.get(a).ok_or(StockError::NotFound)?;
            row.count = 99;
            tx.put(row);
            tx.remove(a);
            let id = tx.allocate_id();
            tx.put(item("c", 1)(id));
            Err(StockError::invalid("abort"))
        });
        assert!(result.is_err());

        let rows = table.list().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].count, 5);
        // The aborted allocation is forgotten as well.
        assert_eq!(table.insert(item("d", 1)).unwrap(), ItemId::new(2));
    }

    #[test]
    fn transaction_reads_its_own_writes() {
        let table = InMemoryTable::<GenericItem>::new();
        let a = table.insert(item("a", 5)).unwrap();

        let seen = table.write(|tx| -> Result<Vec<String>, StoreError> {
            let mut row = tx.get(a).unwrap();
            row.name = "renamed".to_string();
            tx.put(row);
            let id = tx.allocate_id();
            tx.put(item("fresh", 1)(id));
            Ok(tx.scan(&|_: &GenericItem| true).into_iter().map(|r| r.name).collect())
        });
        assert_eq!(seen.unwrap(), vec!["renamed", "fresh"]);
    }

    #[test]
    fn update_of_unknown_id_reports_false() {
        let table = InMemoryTable::<GenericItem>::new();
        let ghost = item("ghost", 1)(ItemId::new(42));
        assert!(!table.update(ghost).unwrap());
        assert!(table.list().unwrap().is_empty());
    }

    #[test]
    fn poisoned_lock_reports_unavailable() {
        let table = InMemoryTable::<GenericItem>::new();
        let a = table.insert(item("a", 1)).unwrap();

        let panicked = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = table.write(|_| -> Result<(), StoreError> { panic!("writer died") });
        }));
        assert!(panicked.is_err());

        assert!(matches!(table.get(a), Err(StoreError::Unavailable(_))));
        assert!(matches!(table.delete(a), Err(StoreError::Unavailable(_))));
        let err: StockError = table.list().unwrap_err().into();
        assert!(matches!(err, StockError::StoreUnavailable(_)));
    }

    #[test]
    fn multiplier_snapshots_replace_and_drop() {
        let store = InMemoryMultiplierStore::new();
        let set = MultiplierSet {
            kind: "Resistor".to_string(),
            unit: "Ohm".to_string(),
            prefixes: vec![stockroom_inventory::SiPrefix::Unit],
            computed_at: chrono::Utc::now(),
        };
        store.replace("Resistor", Some(set.clone())).unwrap();
        assert_eq!(store.get("Resistor").unwrap(), Some(set));
        store.replace("Resistor", None).unwrap();
        assert!(store.all().unwrap().is_empty());
    }
}
