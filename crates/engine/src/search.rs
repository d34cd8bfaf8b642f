//! Exact-field, value-window, text-similarity and restock searches.

use serde::{Deserialize, Serialize};
use tracing::debug;

use stockroom_core::{StockError, StockResult};
use stockroom_infra::{InventoryStore, RecordStore};
use stockroom_inventory::similarity;
use stockroom_inventory::{ActiveComponent, ActiveLookup, PassiveComponent, StockRecord, StockTable};

/// Exact-field passive lookup; unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassiveQuery {
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub mounting_method: Option<String>,
    #[serde(default)]
    pub tolerance: Option<f64>,
}

impl PassiveQuery {
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_mounting_method(mut self, mounting_method: impl Into<String>) -> Self {
        self.mounting_method = Some(mounting_method.into());
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    fn matches(&self, c: &PassiveComponent) -> bool {
        self.subtype.as_deref().is_none_or(|s| c.subtype == s)
            && self.value.is_none_or(|v| c.value == v)
            && self.mounting_method.as_deref().is_none_or(|m| c.mounting_method == m)
            && self.tolerance.is_none_or(|t| c.tolerance == Some(t))
    }
}

/// Passive components whose value lies within `window_percent` of `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueWindowQuery {
    pub target: f64,
    /// Half-width of the window in percent; the searcher's default when unset.
    #[serde(default)]
    pub window_percent: Option<f64>,
    #[serde(default)]
    pub subtype: Option<String>,
    /// Minimum tolerance (percent) a component must carry.
    #[serde(default)]
    pub tolerance: Option<f64>,
    #[serde(default)]
    pub mounting_method: Option<String>,
}

impl ValueWindowQuery {
    pub fn new(target: f64) -> Self {
        Self {
            target,
            window_percent: None,
            subtype: None,
            tolerance: None,
            mounting_method: None,
        }
    }

    pub fn with_window_percent(mut self, percent: f64) -> Self {
        self.window_percent = Some(percent);
        self
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn with_mounting_method(mut self, mounting_method: impl Into<String>) -> Self {
        self.mounting_method = Some(mounting_method.into());
        self
    }
}

/// Window search result, ordered by descending value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueWindow {
    pub items: Vec<PassiveComponent>,
    /// Index of the first item closest to the target; `None` when empty.
    pub closest_index: Option<usize>,
    pub length: usize,
}

/// Active-component text query: name and/or part id, joined for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveQuery {
    #[serde(flatten)]
    pub lookup: ActiveLookup,
    #[serde(default)]
    pub is_assembly: bool,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl ActiveQuery {
    pub fn new(lookup: ActiveLookup) -> Self {
        Self {
            lookup,
            is_assembly: false,
            limit: None,
        }
    }

    pub fn assemblies(mut self) -> Self {
        self.is_assembly = true;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone)]
pub struct RangeSearch<S> {
    store: S,
    window_percent: f64,
    match_limit: usize,
}

impl<S: InventoryStore> RangeSearch<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            window_percent: 50.0,
            match_limit: 10,
        }
    }

    pub fn with_window_percent(mut self, percent: f64) -> Self {
        self.window_percent = percent;
        self
    }

    pub fn with_match_limit(mut self, limit: usize) -> Self {
        self.match_limit = limit;
        self
    }

    /// Passive components equal to every field the query sets, in store order.
    pub fn search_passive(&self, query: &PassiveQuery) -> StockResult<Vec<PassiveComponent>> {
        let hits = self.store.passives().scan(|c: &PassiveComponent| query.matches(c))?;
        debug!(hits = hits.len(), "passive lookup");
        Ok(hits)
    }

    /// Active components matching the lookup's part id (exact) and name
    /// (case-insensitive). An empty lookup returns every active component.
    pub fn search_active(&self, lookup: &ActiveLookup) -> StockResult<Vec<ActiveComponent>> {
        let hits = self.store.actives().scan(|c: &ActiveComponent| {
            lookup.part_id().is_none_or(|p| c.has_part_id(p)) && lookup.name().is_none_or(|n| c.has_name(n))
        })?;
        debug!(hits = hits.len(), "active lookup");
        Ok(hits)
    }

    /// Passive components with `value` in `[target·(1−w), target·(1+w)]`,
    /// `w = window_percent / 100`, optionally narrowed by exact subtype and
    /// mounting method and a minimum tolerance.
    pub fn search_by_value_window(&self, query: &ValueWindowQuery) -> StockResult<ValueWindow> {
        let target = query.target;
        if !target.is_finite() || target <= 0.0 {
            return Err(StockError::invalid(format!("target value must be positive, got {target}")));
        }
        let percent = query.window_percent.unwrap_or(self.window_percent);
        if !percent.is_finite() || percent < 0.0 {
            return Err(StockError::invalid(format!("window must be a non-negative percentage, got {percent}")));
        }

        let delta = target * percent / 100.0;
        let (low, high) = (target - delta, target + delta);

        let mut items = self.store.passives().scan(|c: &PassiveComponent| {
            c.value >= low
                && c.value <= high
                && query.subtype.as_deref().is_none_or(|s| c.subtype == s)
                && query.mounting_method.as_deref().is_none_or(|m| c.mounting_method == m)
                && query.tolerance.is_none_or(|t| c.tolerance.is_some_and(|ct| ct >= t))
        })?;
        items.sort_by(|a, b| b.value.total_cmp(&a.value));

        let closest_index = items
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, c)| {
                let distance = (c.value - target).abs();
                match best {
                    Some((_, d)) if d <= distance => best,
                    _ => Some((i, distance)),
                }
            })
            .map(|(i, _)| i);

        debug!(target, percent, hits = items.len(), "value window search");
        Ok(ValueWindow {
            length: items.len(),
            closest_index,
            items,
        })
    }

    /// Active components (or assemblies) ranked by partial-ratio similarity
    /// of their names against the query's name and part id.
    pub fn search_by_text_similarity(&self, query: &ActiveQuery) -> StockResult<Vec<ActiveComponent>> {
        let text = query.lookup.query();
        if text.is_empty() {
            return Err(StockError::invalid("either name or part_id is required"));
        }
        let limit = query.limit.unwrap_or(self.match_limit);

        let candidates = self
            .store
            .actives()
            .scan(|c: &ActiveComponent| c.is_assembly == query.is_assembly)?;
        let ranked = similarity::rank(
            &text,
            candidates.into_iter().map(|c| {
                let name = c.name.clone();
                (c, name)
            }),
            limit,
        );

        Ok(ranked.into_iter().map(|scored| scored.item).collect())
    }

    /// Point-in-time union of records with `count <= threshold` across the
    /// requested tables, in table order then store order.
    ///
    /// A non-empty `types` list keeps only passive and active records whose
    /// subtype matches one of them case-insensitively; generic items are not
    /// typed and are unaffected.
    pub fn search_below_threshold(
        &self,
        tables: &[StockTable],
        types: &[String],
        threshold: i64,
    ) -> StockResult<Vec<StockRecord>> {
        let types: Vec<String> = types.iter().map(|t| t.to_lowercase()).collect();
        let typed = |subtype: &str| types.is_empty() || types.contains(&subtype.to_lowercase());

        let mut out = Vec::new();
        let mut seen = Vec::with_capacity(tables.len());
        for &table in tables {
            if seen.contains(&table) {
                continue;
            }
            seen.push(table);

            match table {
                StockTable::Generic => out.extend(
                    self.store
                        .items()
                        .scan(|i| i.count <= threshold)?
                        .into_iter()
                        .map(StockRecord::Generic),
                ),
                StockTable::Passive => out.extend(
                    self.store
                        .passives()
                        .scan(|c: &PassiveComponent| c.count <= threshold && typed(&c.subtype))?
                        .into_iter()
                        .map(StockRecord::Passive),
                ),
                StockTable::Active | StockTable::Assembly => {
                    let assembly = table == StockTable::Assembly;
                    out.extend(
                        self.store
                            .actives()
                            .scan(|c: &ActiveComponent| {
                                c.is_assembly == assembly && c.count <= threshold && typed(&c.subtype)
                            })?
                            .into_iter()
                            .map(StockRecord::from),
                    )
                }
            }
        }

        debug!(threshold, hits = out.len(), "restock scan");
        Ok(out)
    }
}
