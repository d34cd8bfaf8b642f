//! Create, merge, update and delete of inventory records.
//!
//! Adds are merge-on-add: a generic item with an existing identity key, or
//! a passive component with an existing merge key, adds its count to the
//! stored record instead of creating a second one. Active components are
//! unique by part id and a duplicate add is a conflict.

use tracing::{debug, info};

use stockroom_core::{ActiveId, ItemId, PassiveId, StockError, StockResult};
use stockroom_infra::{InventoryStore, RecordStore};
use stockroom_inventory::stock;
use stockroom_inventory::{
    ActiveComponent, GenericItem, GenericItemUpdate, NewActiveComponent, NewGenericItem, NewPassiveComponent,
    PassiveComponent,
};

#[derive(Debug, Clone)]
pub struct ComponentCatalog<S> {
    store: S,
    default_location: String,
}

impl<S: InventoryStore> ComponentCatalog<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            default_location: "EL".to_string(),
        }
    }

    /// Location assigned to electrical components submitted without one.
    pub fn with_default_location(mut self, location: impl Into<String>) -> Self {
        self.default_location = location.into();
        self
    }

    fn located(&self, location: &mut String) {
        if location.trim().is_empty() {
            *location = self.default_location.clone();
        }
    }

    // --- generic items ---

    /// Add stock of a generic item, merging into the record with the same
    /// identity key when one exists.
    ///
    /// A merge only accumulates the count (re-arming the low-stock alert when
    /// the total rises above the threshold); the stored threshold and
    /// location are kept.
    pub fn add_generic_item(&self, new: NewGenericItem) -> StockResult<ItemId> {
        new.validate()?;
        let key = new.key();

        self.store.items().write(|tx| -> StockResult<ItemId> {
            let existing = tx.scan(&|item: &GenericItem| key.matches(item)).into_iter().next();
            match existing {
                Some(mut item) => {
                    let id = item.id;
                    if new.count > 0 {
                        let threshold = item.threshold;
                        stock::increment(&mut item, new.count, Some(threshold))?;
                    }
                    info!(%id, added = new.count, count = item.count, "merged into existing item");
                    tx.put(item);
                    Ok(id)
                }
                None => {
                    let id = tx.allocate_id();
                    tx.put(GenericItem::create(id, new));
                    debug!(%id, "item created");
                    Ok(id)
                }
            }
        })
    }

    /// Replace the descriptive fields of an item. Count and alert state are
    /// only moved by the ledger.
    pub fn update_generic_item(&self, id: ItemId, update: GenericItemUpdate) -> StockResult<GenericItem> {
        update.validate()?;
        let key = update.key();

        self.store.items().write(|tx| -> StockResult<GenericItem> {
            let mut item = tx.get(id).ok_or(StockError::NotFound)?;
            let taken = tx
                .scan(&|other: &GenericItem| other.id != id && key.matches(other))
                .into_iter()
                .next();
            if let Some(other) = taken {
                return Err(StockError::conflict(format!(
                    "item {} already has this name, size and unit system",
                    other.id
                )));
            }
            item.apply_update(update);
            tx.put(item.clone());
            Ok(item)
        })
    }

    /// Returns `false` when no such item exists.
    pub fn remove_generic_item(&self, id: ItemId) -> StockResult<bool> {
        let removed = self.store.items().delete(id)?;
        if removed {
            info!(%id, "item removed");
        }
        Ok(removed)
    }

    pub fn get_generic_item(&self, id: ItemId) -> StockResult<GenericItem> {
        self.store.items().get(id)?.ok_or(StockError::NotFound)
    }

    pub fn list_generic_items(&self) -> StockResult<Vec<GenericItem>> {
        Ok(self.store.items().list()?)
    }

    // --- passive components ---

    /// Add a passive component, merging into the record with the same merge
    /// key and part number when one exists.
    ///
    /// Unlike generic items, a merge refreshes every descriptive field from
    /// `new` while the count accumulates.
    pub fn add_passive_component(&self, mut new: NewPassiveComponent) -> StockResult<PassiveId> {
        self.located(&mut new.location);
        new.validate()?;

        self.store.passives().write(|tx| -> StockResult<PassiveId> {
            let existing = {
                let key = new.merge_key();
                tx.scan(&|c: &PassiveComponent| key.matches(c)).into_iter().next()
            };
            match existing {
                Some(mut component) => {
                    let id = component.id;
                    let added = new.count;
                    component.absorb(new)?;
                    info!(%id, added, count = component.count, "merged into existing passive component");
                    tx.put(component);
                    Ok(id)
                }
                None => {
                    let id = tx.allocate_id();
                    tx.put(PassiveComponent::create(id, new));
                    debug!(%id, "passive component created");
                    Ok(id)
                }
            }
        })
    }

    /// Replace every field of a passive component, count included.
    ///
    /// Taking the merge key of another stored component is a conflict, so
    /// later adds always have a single record to merge into.
    pub fn update_passive_component(
        &self,
        id: PassiveId,
        mut update: NewPassiveComponent,
    ) -> StockResult<PassiveComponent> {
        self.located(&mut update.location);
        update.validate()?;

        self.store.passives().write(|tx| -> StockResult<PassiveComponent> {
            if tx.get(id).is_none() {
                return Err(StockError::NotFound);
            }
            let taken = {
                let key = update.merge_key();
                tx.scan(&|c: &PassiveComponent| c.id != id && key.matches(c))
                    .into_iter()
                    .next()
            };
            if let Some(other) = taken {
                return Err(StockError::conflict(format!(
                    "passive component {} already has these electrical properties",
                    other.id
                )));
            }
            let component = PassiveComponent::create(id, update);
            tx.put(component.clone());
            Ok(component)
        })
    }

    pub fn remove_passive_component(&self, id: PassiveId) -> StockResult<bool> {
        let removed = self.store.passives().delete(id)?;
        if removed {
            info!(%id, "passive component removed");
        }
        Ok(removed)
    }

    pub fn get_passive_component(&self, id: PassiveId) -> StockResult<PassiveComponent> {
        self.store.passives().get(id)?.ok_or(StockError::NotFound)
    }

    pub fn list_passive_components(&self) -> StockResult<Vec<PassiveComponent>> {
        Ok(self.store.passives().list()?)
    }

    // --- active components ---

    /// Add an active component or assembly; a part id already in stock is a
    /// conflict.
    pub fn add_active_component(&self, mut new: NewActiveComponent) -> StockResult<ActiveId> {
        self.located(&mut new.location);
        new.validate()?;

        self.store.actives().write(|tx| -> StockResult<ActiveId> {
            let taken = tx
                .scan(&|c: &ActiveComponent| c.has_part_id(&new.part_id))
                .into_iter()
                .next();
            if let Some(other) = taken {
                return Err(StockError::conflict(format!(
                    "part id {:?} already stocked as active {}",
                    new.part_id, other.id
                )));
            }
            let id = tx.allocate_id();
            tx.put(ActiveComponent::create(id, new));
            debug!(%id, "active component created");
            Ok(id)
        })
    }

    /// Replace every field of an active component except its alert flag.
    pub fn update_active_component(
        &self,
        id: ActiveId,
        mut update: NewActiveComponent,
    ) -> StockResult<ActiveComponent> {
        self.located(&mut update.location);
        update.validate()?;

        self.store.actives().write(|tx| -> StockResult<ActiveComponent> {
            let mut component = tx.get(id).ok_or(StockError::NotFound)?;
            let taken = tx
                .scan(&|c: &ActiveComponent| c.id != id && c.has_part_id(&update.part_id))
                .into_iter()
                .next();
            if let Some(other) = taken {
                return Err(StockError::conflict(format!(
                    "part id {:?} already stocked as active {}",
                    update.part_id, other.id
                )));
            }
            component.apply_update(update);
            tx.put(component.clone());
            Ok(component)
        })
    }

    pub fn remove_active_component(&self, id: ActiveId) -> StockResult<bool> {
        let removed = self.store.actives().delete(id)?;
        if removed {
            info!(%id, "active component removed");
        }
        Ok(removed)
    }

    pub fn get_active_component(&self, id: ActiveId) -> StockResult<ActiveComponent> {
        self.store.actives().get(id)?.ok_or(StockError::NotFound)
    }

    pub fn list_active_components(&self) -> StockResult<Vec<ActiveComponent>> {
        Ok(self.store.actives().list()?)
    }
}
