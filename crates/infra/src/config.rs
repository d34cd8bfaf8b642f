//! Engine configuration.
//!
//! Loaded from `STOCKROOM_*` environment variables or a JSON document. Every
//! field has a default, so an empty environment yields a working config.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },

    #[error("malformed config document: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Component type that gets a multiplier ladder, with its display unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitType {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub unit: String,
}

impl UnitType {
    pub fn new(kind: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            unit: unit.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Location given to electrical components added without one.
    pub default_location: String,
    /// Suggestions returned by approximate item resolution.
    pub match_limit: usize,
    /// Matches returned by active-component text search.
    pub active_match_limit: usize,
    /// Default half-width of a value-window search, in percent.
    pub window_percent: f64,
    /// Default cut-off for the restock scan.
    pub restock_threshold: i64,
    /// Low-stock threshold for active components; `None` disables alerts.
    pub active_alert_threshold: Option<i64>,
    /// Types `derive_all` recomputes.
    pub multiplier_types: Vec<UnitType>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_location: "EL".to_string(),
            match_limit: 5,
            active_match_limit: 10,
            window_percent: 50.0,
            restock_threshold: 50,
            active_alert_threshold: None,
            multiplier_types: vec![
                UnitType::new("Resistor", "Ohm"),
                UnitType::new("Capacitor", "Farad"),
                UnitType::new("Polyfuse", "Ohm"),
            ],
        }
    }
}

impl EngineConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key/value source; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("STOCKROOM_DEFAULT_LOCATION") {
            let v = v.trim();
            if v.is_empty() {
                return Err(ConfigError::invalid("STOCKROOM_DEFAULT_LOCATION", "must not be empty"));
            }
            config.default_location = v.to_string();
        }
        if let Some(v) = lookup("STOCKROOM_MATCH_LIMIT") {
            config.match_limit = parse("STOCKROOM_MATCH_LIMIT", &v)?;
        }
        if let Some(v) = lookup("STOCKROOM_ACTIVE_MATCH_LIMIT") {
            config.active_match_limit = parse("STOCKROOM_ACTIVE_MATCH_LIMIT", &v)?;
        }
        if let Some(v) = lookup("STOCKROOM_WINDOW_PERCENT") {
            config.window_percent = parse("STOCKROOM_WINDOW_PERCENT", &v)?;
        }
        if let Some(v) = lookup("STOCKROOM_RESTOCK_THRESHOLD") {
            config.restock_threshold = parse("STOCKROOM_RESTOCK_THRESHOLD", &v)?;
        }
        if let Some(v) = lookup("STOCKROOM_ACTIVE_ALERT_THRESHOLD") {
            if !v.trim().is_empty() {
                config.active_alert_threshold = Some(parse("STOCKROOM_ACTIVE_ALERT_THRESHOLD", &v)?);
            }
        }
        if let Some(v) = lookup("STOCKROOM_MULTIPLIER_TYPES") {
            config.multiplier_types = parse_unit_types(&v);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.window_percent.is_finite() || self.window_percent < 0.0 {
            return Err(ConfigError::invalid(
                "window_percent",
                format!("{} is not a non-negative percentage", self.window_percent),
            ));
        }
        if self.multiplier_types.iter().any(|t| t.kind.trim().is_empty()) {
            return Err(ConfigError::invalid("multiplier_types", "type names must not be empty"));
        }
        Ok(())
    }

    pub fn with_default_location(mut self, location: impl Into<String>) -> Self {
        self.default_location = location.into();
        self
    }

    pub fn with_match_limit(mut self, limit: usize) -> Self {
        self.match_limit = limit;
        self
    }

    pub fn with_active_match_limit(mut self, limit: usize) -> Self {
        self.active_match_limit = limit;
        self
    }

    pub fn with_window_percent(mut self, percent: f64) -> Self {
        self.window_percent = percent;
        self
    }

    pub fn with_restock_threshold(mut self, threshold: i64) -> Self {
        self.restock_threshold = threshold;
        self
    }

    pub fn with_active_alert_threshold(mut self, threshold: i64) -> Self {
        self.active_alert_threshold = Some(threshold);
        self
    }

    pub fn with_multiplier_types(mut self, types: Vec<UnitType>) -> Self {
        self.multiplier_types = types;
        self
    }

    /// Configured display unit for a component type, matched case-insensitively.
    pub fn unit_for(&self, kind: &str) -> &str {
        self.multiplier_types
            .iter()
            .find(|t| t.kind.eq_ignore_ascii_case(kind))
            .map(|t| t.unit.as_str())
            .unwrap_or("")
    }
}

fn parse<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::invalid(key, format!("{raw:?}: {e}")))
}

/// `Resistor:Ohm,Capacitor:Farad`; a bare name gets an empty unit.
fn parse_unit_types(raw: &str) -> Vec<UnitType> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((kind, unit)) => UnitType::new(kind.trim(), unit.trim()),
            None => UnitType::new(entry, ""),
        })
        .collect()
}
