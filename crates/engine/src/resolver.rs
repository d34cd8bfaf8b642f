//! Identity resolution: exact key first, partial-ratio suggestions second.

use serde::Serialize;
use tracing::debug;

use stockroom_core::{ActiveId, ItemId, StockError, StockResult};
use stockroom_infra::{InventoryStore, RecordStore};
use stockroom_inventory::similarity;
use stockroom_inventory::{ActiveComponent, ActiveLookup, GenericItem, ItemKey};

/// Outcome of [`IdentityResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Resolution {
    Exact(ItemId),
    /// No exact match; closest records by similarity, best first. May be empty.
    Suggestions(Vec<GenericItem>),
}

#[derive(Debug, Clone)]
pub struct IdentityResolver<S> {
    store: S,
}

impl<S: InventoryStore> IdentityResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Id of the generic item whose identity key equals (name, is_metric, size),
    /// ignoring case on name and size.
    pub fn resolve_exact(&self, name: &str, is_metric: bool, size: &str) -> StockResult<ItemId> {
        let key = ItemKey::new(name, is_metric, size);
        let hit = self.store.items().read(|tx| {
            tx.scan(&|item: &GenericItem| key.matches(item))
                .into_iter()
                .next()
                .map(|item| item.id)
        })?;

        hit.ok_or_else(|| {
            debug!(name, size, is_metric, "no exact item match");
            StockError::NotFound
        })
    }

    /// Up to `limit` items with the same `is_metric`, ranked by partial-ratio
    /// similarity of `"{name} {size}"` against each record's corpus text.
    ///
    /// Never mutates; an empty result is not an error.
    pub fn resolve_approximate(
        &self,
        name: &str,
        size: &str,
        is_metric: bool,
        limit: usize,
    ) -> StockResult<Vec<GenericItem>> {
        let candidates = self.store.items().scan(|item| item.is_metric == is_metric)?;
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let query = if size.trim().is_empty() {
            name.to_string()
        } else {
            format!("{name} {size}")
        };
        let ranked = similarity::rank(
            &query,
            candidates.into_iter().map(|item| {
                let text = item.corpus();
                (item, text)
            }),
            limit,
        );

        Ok(ranked.into_iter().map(|scored| scored.item).collect())
    }

    /// Exact match when one exists; suggestions are computed only on a miss.
    pub fn resolve(&self, name: &str, is_metric: bool, size: &str, limit: usize) -> StockResult<Resolution> {
        match self.resolve_exact(name, is_metric, size) {
            Ok(id) => Ok(Resolution::Exact(id)),
            Err(StockError::NotFound) => self
                .resolve_approximate(name, size, is_metric, limit)
                .map(Resolution::Suggestions),
            Err(err) => Err(err),
        }
    }

    /// Active component by part id, falling back to a case-insensitive name
    /// match when no part id is given.
    pub fn resolve_active(&self, lookup: &ActiveLookup) -> StockResult<ActiveId> {
        let hit = match (lookup.part_id(), lookup.name()) {
            (Some(part_id), _) => self.first_active(|c| c.has_part_id(part_id))?,
            (None, Some(name)) => self.first_active(|c| c.has_name(name))?,
            (None, None) => return Err(StockError::invalid("either part_id or name is required")),
        };

        hit.ok_or_else(|| {
            debug!(part_id = ?lookup.part_id(), name = ?lookup.name(), "no active component match");
            StockError::NotFound
        })
    }

    fn first_active<F>(&self, filter: F) -> StockResult<Option<ActiveId>>
    where
        F: Fn(&ActiveComponent) -> bool,
    {
        let hit = self
            .store
            .actives()
            .read(|tx| tx.scan(&filter).into_iter().next().map(|c| c.id))?;
        Ok(hit)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::fixtures;
    use stockroom_infra::InMemoryInventoryStore;

    fn seeded() -> (Arc<InMemoryInventoryStore>, IdentityResolver<Arc<InMemoryInventoryStore>>) {
        let store = Arc::new(InMemoryInventoryStore::new());
        for (name, size) in [("Hex Bolt", "M3"), ("Hex Nut", "M3"), ("Washer", "M4")] {
            let new = fixtures::item(name, size, 10, 5);
            store.items().insert(|id| GenericItem::create(id, new)).unwrap();
        }
        let mut imperial = fixtures::item("Hex Bolt", "1/4", 10, 5);
        imperial.is_metric = false;
        store.items().insert(|id| GenericItem::create(id, imperial)).unwrap();

        (store.clone(), IdentityResolver::new(store))
    }

    #[test]
    fn exact_match_ignores_case() {
        let (_, resolver) = seeded();
        assert_eq!(resolver.resolve_exact("hex nut", true, "m3").unwrap(), ItemId::new(2));
        assert_eq!(resolver.resolve_exact("HEX BOLT", false, "1/4").unwrap(), ItemId::new(4));
    }

    #[test]
    fn drained_item_still_resolves() {
        let (store, resolver) = seeded();
        let ledger = crate::ledger::StockLedger::new(store.clone());
        ledger.decrement_item(ItemId::new(3), 10).unwrap();
        assert_eq!(store.items().get(ItemId::new(3)).unwrap().unwrap().count, 0);

        assert_eq!(resolver.resolve_exact("washer", true, "M4").unwrap(), ItemId::new(3));
        assert_eq!(resolver.resolve("Washer", true, "M4", 5).unwrap(), Resolution::Exact(ItemId::new(3)));
    }

    #[test]
    fn exact_match_respects_metric_flag() {
        let (_, resolver) = seeded();
        assert_eq!(resolver.resolve_exact("Washer", false, "M4"), Err(StockError::NotFound));
    }

    #[test]
    fn approximate_ranks_within_metric_class() {
        let (_, resolver) = seeded();
        let hits = resolver.resolve_approximate("hex bolt", "m3", true, 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, ItemId::new(1));
        assert!(hits.iter().all(|item| item.is_metric));
    }

    #[test]
    fn approximate_with_no_candidates_is_empty() {
        let store = Arc::new(InMemoryInventoryStore::new());
        let resolver = IdentityResolver::new(store);
        assert!(resolver.resolve_approximate("anything", "", true, 5).unwrap().is_empty());
    }

    #[test]
    fn resolve_prefers_exact_over_better_scoring_suggestions() {
        let (_, resolver) = seeded();
        assert_eq!(
            resolver.resolve("Hex Nut", true, "M3", 5).unwrap(),
            Resolution::Exact(ItemId::new(2))
        );
        match resolver.resolve("Hex Nutt", true, "M3", 5).unwrap() {
            Resolution::Suggestions(items) => assert_eq!(items[0].id, ItemId::new(2)),
            other => panic!("expected suggestions, got {other:?}"),
        }
    }

    #[test]
    fn active_lookup_prefers_part_id_then_name() {
        let store = Arc::new(InMemoryInventoryStore::new());
        for (part, name) in [("LM358N", "Dual op-amp"), ("NE555P", "Timer")] {
            let new = fixtures::active(part, name, 3);
            store.actives().insert(|id| ActiveComponent::create(id, new)).unwrap();
        }
        let resolver = IdentityResolver::new(store);

        assert_eq!(
            resolver.resolve_active(&ActiveLookup::by_part_id("NE555P")).unwrap(),
            ActiveId::new(2)
        );
        assert_eq!(
            resolver.resolve_active(&ActiveLookup::by_name("dual OP-AMP")).unwrap(),
            ActiveId::new(1)
        );
        assert_eq!(
            resolver.resolve_active(&ActiveLookup::by_part_id("ne555p")),
            Err(StockError::NotFound)
        );
        assert!(matches!(
            resolver.resolve_active(&ActiveLookup::default()),
            Err(StockError::InvalidArgument(_))
        ));
    }
}
