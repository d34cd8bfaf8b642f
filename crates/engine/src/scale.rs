//! Engineering-notation multiplier ladders per component type.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, info};

use stockroom_core::StockResult;
use stockroom_infra::{InventoryStore, MultiplierStore, RecordStore, UnitType};
use stockroom_inventory::units::prefix_ladder;
use stockroom_inventory::{MultiplierSet, MultiplierValue, PassiveComponent};

#[derive(Debug, Clone)]
pub struct UnitScaleDeriver<S> {
    store: S,
    types: Vec<UnitType>,
}

impl<S: InventoryStore> UnitScaleDeriver<S> {
    pub fn new(store: S, types: Vec<UnitType>) -> Self {
        Self { store, types }
    }

    /// Configured spelling and unit for `kind`; unknown types keep the
    /// caller's spelling and get no unit.
    fn canonical(&self, kind: &str) -> (String, String) {
        self.types
            .iter()
            .find(|t| t.kind.eq_ignore_ascii_case(kind))
            .map(|t| (t.kind.clone(), t.unit.clone()))
            .unwrap_or_else(|| (kind.to_string(), String::new()))
    }

    /// Recompute and store the prefix ladder for one component type.
    ///
    /// The ladder spans the magnitudes of every positive value stocked for
    /// the type (matched case-insensitively). With no such values the stored
    /// snapshot for the type is dropped and `None` is returned.
    pub fn derive_multipliers(&self, kind: &str) -> StockResult<Option<MultiplierSet>> {
        let (kind, unit) = self.canonical(kind);
        let needle = kind.to_lowercase();

        let values: Vec<f64> = self
            .store
            .passives()
            .scan(|c: &PassiveComponent| c.subtype.to_lowercase() == needle)?
            .into_iter()
            .map(|c| c.value)
            .collect();

        let set = prefix_ladder(values).map(|prefixes| MultiplierSet {
            kind: kind.clone(),
            unit,
            prefixes,
            computed_at: Utc::now(),
        });
        self.store.multipliers().replace(&kind, set.clone())?;

        match &set {
            Some(set) => debug!(kind = %set.kind, rungs = set.prefixes.len(), "multipliers derived"),
            None => debug!(%kind, "no positive values; multipliers cleared"),
        }
        Ok(set)
    }

    /// Recompute every configured type.
    pub fn derive_all(&self) -> StockResult<Vec<MultiplierSet>> {
        let mut sets = Vec::with_capacity(self.types.len());
        for unit_type in &self.types {
            if let Some(set) = self.derive_multipliers(&unit_type.kind)? {
                sets.push(set);
            }
        }
        info!(types = self.types.len(), derived = sets.len(), "multipliers recomputed");
        Ok(sets)
    }

    /// Stored ladders as display rows, keyed by type. Read-only.
    pub fn multiplier_values(&self) -> StockResult<BTreeMap<String, Vec<MultiplierValue>>> {
        Ok(self
            .store
            .multipliers()
            .all()?
            .into_iter()
            .map(|set| (set.kind.clone(), set.values()))
            .collect())
    }
}
