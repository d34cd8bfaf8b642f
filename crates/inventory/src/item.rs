use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, ItemId, StockError, StockResult, ValueObject};

use crate::location::Location;
use crate::stock::{AlertState, Stocked};

/// Generic hardware stock item (screws, nuts, standoffs, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericItem {
    pub id: ItemId,
    pub name: String,
    pub size: String,
    pub is_metric: bool,
    pub location: Location,
    pub count: i64,
    pub threshold: i64,
    pub is_contacted: bool,
}

impl Entity for GenericItem {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

impl GenericItem {
    /// Materialise a freshly added item; new records start un-alerted.
    pub fn create(id: ItemId, new: NewGenericItem) -> Self {
        Self {
            id,
            name: new.name,
            size: new.size,
            is_metric: new.is_metric,
            location: new.location,
            count: new.count,
            threshold: new.threshold,
            is_contacted: false,
        }
    }

    pub fn key(&self) -> ItemKey {
        ItemKey::new(&self.name, self.is_metric, &self.size)
    }

    /// Text the approximate matcher scores against.
    pub fn corpus(&self) -> String {
        format!("{} {}", self.name, self.size)
    }

    /// Replace the descriptive fields; count and alert state are untouched.
    pub fn apply_update(&mut self, update: GenericItemUpdate) {
        self.name = update.name;
        self.size = update.size;
        self.is_metric = update.is_metric;
        self.location = update.location;
        self.threshold = update.threshold;
    }
}

impl Stocked for GenericItem {
    fn count(&self) -> i64 {
        self.count
    }

    fn set_count(&mut self, count: i64) {
        self.count = count;
    }

    fn alert(&self) -> Option<AlertState> {
        Some(AlertState::from_contacted(self.is_contacted))
    }

    fn set_alert(&mut self, state: AlertState) {
        self.is_contacted = state.is_contacted();
    }
}

/// Identity key of a generic item: (name, is_metric, size), case-insensitive
/// on name and size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    name: String,
    is_metric: bool,
    size: String,
}

impl ValueObject for ItemKey {}

impl ItemKey {
    pub fn new(name: &str, is_metric: bool, size: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            is_metric,
            size: size.to_lowercase(),
        }
    }

    pub fn matches(&self, item: &GenericItem) -> bool {
        *self == item.key()
    }
}

/// Input for adding (or merging into) a generic item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGenericItem {
    pub name: String,
    pub size: String,
    pub is_metric: bool,
    pub location: Location,
    pub count: i64,
    pub threshold: i64,
}

impl NewGenericItem {
    pub fn key(&self) -> ItemKey {
        ItemKey::new(&self.name, self.is_metric, &self.size)
    }

    pub fn validate(&self) -> StockResult<()> {
        if self.name.trim().is_empty() {
            return Err(StockError::invalid("name cannot be empty"));
        }
        if self.count < 0 {
            return Err(StockError::invalid("count cannot be negative"));
        }
        Ok(())
    }
}

/// Descriptive fields an explicit update may replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericItemUpdate {
    pub name: String,
    pub size: String,
    pub is_metric: bool,
    pub location: Location,
    pub threshold: i64,
}

impl GenericItemUpdate {
    pub fn key(&self) -> ItemKey {
        ItemKey::new(&self.name, self.is_metric, &self.size)
    }

    pub fn validate(&self) -> StockResult<()> {
        if self.name.trim().is_empty() {
            return Err(StockError::invalid("name cannot be empty"));
        }
        Ok(())
    }
}
