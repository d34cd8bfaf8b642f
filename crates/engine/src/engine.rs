//! Facade over the five components, sharing one store.

use std::collections::BTreeMap;
use std::sync::Arc;

use stockroom_core::{ActiveId, ItemId, PassiveId, StockResult};
use stockroom_infra::{EngineConfig, InMemoryInventoryStore, InventoryStore};
use stockroom_inventory::{
    ActiveComponent, ActiveLookup, GenericItem, GenericItemUpdate, MultiplierSet, MultiplierValue,
    NewActiveComponent, NewGenericItem, NewPassiveComponent, PassiveComponent, StockRecord, StockTable, Transition,
};

use crate::catalog::ComponentCatalog;
use crate::ledger::{NotifySignal, StockLedger};
use crate::resolver::{IdentityResolver, Resolution};
use crate::scale::UnitScaleDeriver;
use crate::search::{ActiveQuery, PassiveQuery, RangeSearch, ValueWindow, ValueWindowQuery};

/// Inventory engine: every component wired to the same `Arc` store and
/// configured from one [`EngineConfig`].
///
/// Cheap to clone and safe to share across threads.
#[derive(Debug)]
pub struct StockEngine<S> {
    config: EngineConfig,
    resolver: IdentityResolver<Arc<S>>,
    ledger: StockLedger<Arc<S>>,
    catalog: ComponentCatalog<Arc<S>>,
    scale: UnitScaleDeriver<Arc<S>>,
    search: RangeSearch<Arc<S>>,
}

impl<S> Clone for StockEngine<S> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            resolver: self.resolver.clone(),
            ledger: self.ledger.clone(),
            catalog: self.catalog.clone(),
            scale: self.scale.clone(),
            search: self.search.clone(),
        }
    }
}

impl StockEngine<InMemoryInventoryStore> {
    /// Engine over a fresh in-memory store.
    pub fn in_memory(config: EngineConfig) -> Self {
        Self::new(Arc::new(InMemoryInventoryStore::new()), config)
    }
}

impl<S: InventoryStore> StockEngine<S> {
    pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
        Self {
            resolver: IdentityResolver::new(store.clone()),
            ledger: StockLedger::new(store.clone()).with_active_alert_threshold(config.active_alert_threshold),
            catalog: ComponentCatalog::new(store.clone()).with_default_location(config.default_location.clone()),
            scale: UnitScaleDeriver::new(store.clone(), config.multiplier_types.clone()),
            search: RangeSearch::new(store)
                .with_window_percent(config.window_percent)
                .with_match_limit(config.active_match_limit),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn resolver(&self) -> &IdentityResolver<Arc<S>> {
        &self.resolver
    }

    pub fn ledger(&self) -> &StockLedger<Arc<S>> {
        &self.ledger
    }

    pub fn catalog(&self) -> &ComponentCatalog<Arc<S>> {
        &self.catalog
    }

    pub fn scale(&self) -> &UnitScaleDeriver<Arc<S>> {
        &self.scale
    }

    pub fn search(&self) -> &RangeSearch<Arc<S>> {
        &self.search
    }

    // --- resolution ---

    pub fn resolve_exact(&self, name: &str, is_metric: bool, size: &str) -> StockResult<ItemId> {
        self.resolver.resolve_exact(name, is_metric, size)
    }

    /// Approximate matches using the configured suggestion limit.
    pub fn resolve_approximate(&self, name: &str, size: &str, is_metric: bool) -> StockResult<Vec<GenericItem>> {
        self.resolver
            .resolve_approximate(name, size, is_metric, self.config.match_limit)
    }

    pub fn resolve(&self, name: &str, is_metric: bool, size: &str) -> StockResult<Resolution> {
        self.resolver.resolve(name, is_metric, size, self.config.match_limit)
    }

    pub fn resolve_active(&self, lookup: &ActiveLookup) -> StockResult<ActiveId> {
        self.resolver.resolve_active(lookup)
    }

    // --- stock movement ---

    pub fn increment_item(&self, id: ItemId, amount: i64) -> StockResult<Transition> {
        self.ledger.increment_item(id, amount)
    }

    pub fn decrement_item(&self, id: ItemId, amount: i64) -> StockResult<NotifySignal> {
        self.ledger.decrement_item(id, amount)
    }

    pub fn increment_passive(&self, id: PassiveId, amount: i64) -> StockResult<Transition> {
        self.ledger.increment_passive(id, amount)
    }

    pub fn decrement_passive(&self, id: PassiveId, amount: i64) -> StockResult<NotifySignal> {
        self.ledger.decrement_passive(id, amount)
    }

    pub fn increment_active(&self, id: ActiveId, amount: i64) -> StockResult<Transition> {
        self.ledger.increment_active(id, amount)
    }

    pub fn decrement_active(&self, id: ActiveId, amount: i64) -> StockResult<NotifySignal> {
        self.ledger.decrement_active(id, amount)
    }

    // --- catalog ---

    pub fn add_generic_item(&self, new: NewGenericItem) -> StockResult<ItemId> {
        self.catalog.add_generic_item(new)
    }

    pub fn update_generic_item(&self, id: ItemId, update: GenericItemUpdate) -> StockResult<GenericItem> {
        self.catalog.update_generic_item(id, update)
    }

    pub fn remove_generic_item(&self, id: ItemId) -> StockResult<bool> {
        self.catalog.remove_generic_item(id)
    }

    pub fn get_generic_item(&self, id: ItemId) -> StockResult<GenericItem> {
        self.catalog.get_generic_item(id)
    }

    pub fn list_generic_items(&self) -> StockResult<Vec<GenericItem>> {
        self.catalog.list_generic_items()
    }

    pub fn add_passive_component(&self, new: NewPassiveComponent) -> StockResult<PassiveId> {
        self.catalog.add_passive_component(new)
    }

    pub fn update_passive_component(
        &self,
        id: PassiveId,
        update: NewPassiveComponent,
    ) -> StockResult<PassiveComponent> {
        self.catalog.update_passive_component(id, update)
    }

    pub fn remove_passive_component(&self, id: PassiveId) -> StockResult<bool> {
        self.catalog.remove_passive_component(id)
    }

    pub fn get_passive_component(&self, id: PassiveId) -> StockResult<PassiveComponent> {
        self.catalog.get_passive_component(id)
    }

    pub fn list_passive_components(&self) -> StockResult<Vec<PassiveComponent>> {
        self.catalog.list_passive_components()
    }

    pub fn add_active_component(&self, new: NewActiveComponent) -> StockResult<ActiveId> {
        self.catalog.add_active_component(new)
    }

    pub fn update_active_component(
        &self,
        id: ActiveId,
        update: NewActiveComponent,
    ) -> StockResult<ActiveComponent> {
        self.catalog.update_active_component(id, update)
    }

    pub fn remove_active_component(&self, id: ActiveId) -> StockResult<bool> {
        self.catalog.remove_active_component(id)
    }

    pub fn get_active_component(&self, id: ActiveId) -> StockResult<ActiveComponent> {
        self.catalog.get_active_component(id)
    }

    pub fn list_active_components(&self) -> StockResult<Vec<ActiveComponent>> {
        self.catalog.list_active_components()
    }

    // --- multipliers ---

    pub fn derive_multipliers(&self, kind: &str) -> StockResult<Option<MultiplierSet>> {
        self.scale.derive_multipliers(kind)
    }

    pub fn derive_all(&self) -> StockResult<Vec<MultiplierSet>> {
        self.scale.derive_all()
    }

    pub fn multiplier_values(&self) -> StockResult<BTreeMap<String, Vec<MultiplierValue>>> {
        self.scale.multiplier_values()
    }

    // --- search ---

    pub fn search_passive(&self, query: &PassiveQuery) -> StockResult<Vec<PassiveComponent>> {
        self.search.search_passive(query)
    }

    pub fn search_active(&self, lookup: &ActiveLookup) -> StockResult<Vec<ActiveComponent>> {
        self.search.search_active(lookup)
    }

    pub fn search_by_value_window(&self, query: &ValueWindowQuery) -> StockResult<ValueWindow> {
        self.search.search_by_value_window(query)
    }

    pub fn search_by_text_similarity(&self, query: &ActiveQuery) -> StockResult<Vec<ActiveComponent>> {
        self.search.search_by_text_similarity(query)
    }

    pub fn search_below_threshold(
        &self,
        tables: &[StockTable],
        types: &[String],
        threshold: i64,
    ) -> StockResult<Vec<StockRecord>> {
        self.search.search_below_threshold(tables, types, threshold)
    }

    /// Restock scan over every table at the configured threshold.
    pub fn restock_report(&self) -> StockResult<Vec<StockRecord>> {
        self.search
            .search_below_threshold(&StockTable::ALL, &[], self.config.restock_threshold)
    }
}
