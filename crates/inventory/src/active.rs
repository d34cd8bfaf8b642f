use serde::{Deserialize, Serialize};

use stockroom_core::{ActiveId, Entity, StockError, StockResult};

use crate::stock::{AlertState, Stocked};

/// Active electrical component (IC, module, ...) or assembly, keyed by part id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveComponent {
    pub id: ActiveId,
    pub part_id: String,
    pub name: String,
    pub description: String,
    pub link: String,
    pub location: String,
    pub rack: i64,
    pub slot: String,
    pub count: i64,
    pub is_contacted: bool,
    pub is_assembly: bool,
    #[serde(rename = "type")]
    pub subtype: String,
}

impl Entity for ActiveComponent {
    type Id = ActiveId;

    fn id(&self) -> ActiveId {
        self.id
    }
}

impl ActiveComponent {
    pub fn create(id: ActiveId, new: NewActiveComponent) -> Self {
        Self {
            id,
            part_id: new.part_id,
            name: new.name,
            description: new.description,
            link: new.link,
            location: new.location,
            rack: new.rack,
            slot: new.slot,
            count: new.count,
            is_contacted: false,
            is_assembly: new.is_assembly,
            subtype: new.subtype,
        }
    }

    /// Replace every field but the id and the alert flag.
    pub fn apply_update(&mut self, update: NewActiveComponent) {
        let is_contacted = self.is_contacted;
        *self = Self::create(self.id, update);
        self.is_contacted = is_contacted;
    }

    pub fn has_part_id(&self, part_id: &str) -> bool {
        self.part_id == part_id
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

impl Stocked for ActiveComponent {
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

/// Input for adding an active component; also the replacement payload for updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewActiveComponent {
    pub part_id: String,
    pub name: String,
    pub description: String,
    pub link: String,
    pub location: String,
    pub rack: i64,
    pub slot: String,
    pub count: i64,
    pub is_assembly: bool,
    #[serde(rename = "type")]
    pub subtype: String,
}

impl NewActiveComponent {
    pub fn validate(&self) -> StockResult<()> {
        if self.part_id.trim().is_empty() {
            return Err(StockError::invalid("part_id cannot be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(StockError::invalid("name cannot be empty"));
        }
        if self.count < 0 {
            return Err(StockError::invalid("count cannot be negative"));
        }
        Ok(())
    }
}

/// How a caller identifies an active component: part id first, name as fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveLookup {
    pub part_id: Option<String>,
    pub name: Option<String>,
}

impl ActiveLookup {
    pub fn by_part_id(part_id: impl Into<String>) -> Self {
        Self {
            part_id: Some(part_id.into()),
            name: None,
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            part_id: None,
            name: Some(name.into()),
        }
    }

    /// Blank strings count as absent.
    pub fn part_id(&self) -> Option<&str> {
        self.part_id.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.part_id().is_none() && self.name().is_none()
    }

    /// Single query string for text similarity (name and part id joined).
    pub fn query(&self) -> String {
        [self.name(), self.part_id()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}
