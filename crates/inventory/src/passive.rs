use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, PassiveId, StockError, StockResult};

use crate::stock::{AlertState, Stocked};

/// Passive electrical component stocked by value (resistor, capacitor, polyfuse, ...).
///
/// `value` is in base SI units (ohms, farads, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveComponent {
    pub id: PassiveId,
    pub subtype: String,
    pub value: f64,
    pub tolerance: Option<f64>,
    pub mounting_method: String,
    pub part_number: Option<String>,
    pub location: String,
    pub rack: i64,
    pub slot: String,
    pub count: i64,
    pub max_power: f64,
    pub max_voltage: f64,
    pub max_current: f64,
    pub hold_current: Option<f64>,
    pub polarity: Option<bool>,
    pub seller: String,
    pub dielectric_material: String,
    pub link: String,
}

impl Entity for PassiveComponent {
    type Id = PassiveId;

    fn id(&self) -> PassiveId {
        self.id
    }
}

impl PassiveComponent {
    pub fn create(id: PassiveId, new: NewPassiveComponent) -> Self {
        Self {
            id,
            subtype: new.subtype,
            value: new.value,
            tolerance: new.tolerance,
            mounting_method: new.mounting_method,
            part_number: new.part_number,
            location: new.location,
            rack: new.rack,
            slot: new.slot,
            count: new.count,
            max_power: new.max_power,
            max_voltage: new.max_voltage,
            max_current: new.max_current,
            hold_current: new.hold_current,
            polarity: new.polarity,
            seller: new.seller,
            dielectric_material: new.dielectric_material,
            link: new.link,
        }
    }

    /// Merge a duplicate addition: counts accumulate and every descriptive
    /// field takes the newer value.
    pub fn absorb(&mut self, new: NewPassiveComponent) -> StockResult<()> {
        let count = self
            .count
            .checked_add(new.count)
            .ok_or_else(|| StockError::invalid("count overflow"))?;
        *self = Self::create(self.id, new);
        self.count = count;
        Ok(())
    }
}

impl Stocked for PassiveComponent {
    fn count(&self) -> i64 {
        self.count
    }

    fn set_count(&mut self, count: i64) {
        self.count = count;
    }

    fn alert(&self) -> Option<AlertState> {
        None
    }

    fn set_alert(&mut self, _state: AlertState) {}
}

/// Merge key of a passive component.
///
/// Two additions describe the same stock when value, subtype, tolerance,
/// mounting method and position agree and the part numbers are equal.
#[derive(Debug, Clone, PartialEq)]
pub struct PassiveMergeKey<'a> {
    value: f64,
    subtype: &'a str,
    tolerance: Option<f64>,
    mounting_method: &'a str,
    location: &'a str,
    rack: i64,
    slot: &'a str,
    part_number: Option<&'a str>,
}

impl PassiveMergeKey<'_> {
    pub fn matches(&self, other: &PassiveComponent) -> bool {
        self.value == other.value
            && self.subtype == other.subtype
            && self.tolerance == other.tolerance
            && self.mounting_method == other.mounting_method
            && self.location == other.location
            && self.rack == other.rack
            && self.slot == other.slot
            && self.part_number == other.part_number.as_deref()
    }
}

/// Input for adding (or merging into) a passive component; also the full
/// replacement payload for updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPassiveComponent {
    pub subtype: String,
    pub value: f64,
    pub tolerance: Option<f64>,
    pub mounting_method: String,
    pub part_number: Option<String>,
    pub location: String,
    pub rack: i64,
    pub slot: String,
    pub count: i64,
    pub max_power: f64,
    pub max_voltage: f64,
    pub max_current: f64,
    pub hold_current: Option<f64>,
    pub polarity: Option<bool>,
    pub seller: String,
    pub dielectric_material: String,
    pub link: String,
}

impl NewPassiveComponent {
    pub fn merge_key(&self) -> PassiveMergeKey<'_> {
        PassiveMergeKey {
            value: self.value,
            subtype: &self.subtype,
            tolerance: self.tolerance,
            mounting_method: &self.mounting_method,
            location: &self.location,
            rack: self.rack,
            slot: &self.slot,
            part_number: self.part_number.as_deref(),
        }
    }

    pub fn validate(&self) -> StockResult<()> {
        if self.subtype.trim().is_empty() {
            return Err(StockError::invalid("subtype cannot be empty"));
        }
        if !self.value.is_finite() || self.value < 0.0 {
            return Err(StockError::invalid(format!(
                "value must be a finite, non-negative number (got {})",
                self.value
            )));
        }
        if let Some(tolerance) = self.tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(StockError::invalid("tolerance must be a non-negative percentage"));
            }
        }
        if self.count < 0 {
            return Err(StockError::invalid("count cannot be negative"));
        }
        Ok(())
    }
}
