//! Engineering-notation scale prefixes.
//!
//! Component values are stored unscaled in base SI units. For display, each
//! component type gets a ladder of SI prefixes spanning the magnitudes that
//! actually occur in stock, one rung per multiple-of-three exponent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::ValueObject;

/// SI prefix with its base-10 exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SiPrefix {
    #[serde(rename = "p")]
    Pico,
    #[serde(rename = "n")]
    Nano,
    #[serde(rename = "u")]
    Micro,
    #[serde(rename = "m")]
    Milli,
    #[serde(rename = "c")]
    Centi,
    #[serde(rename = "d")]
    Deci,
    #[serde(rename = "")]
    Unit,
    #[serde(rename = "k")]
    Kilo,
    #[serde(rename = "M")]
    Mega,
    #[serde(rename = "G")]
    Giga,
    #[serde(rename = "T")]
    Tera,
}

impl SiPrefix {
    pub const ALL: [SiPrefix; 11] = [
        SiPrefix::Pico,
        SiPrefix::Nano,
        SiPrefix::Micro,
        SiPrefix::Milli,
        SiPrefix::Centi,
        SiPrefix::Deci,
        SiPrefix::Unit,
        SiPrefix::Kilo,
        SiPrefix::Mega,
        SiPrefix::Giga,
        SiPrefix::Tera,
    ];

    pub fn exponent(self) -> i32 {
        match self {
            SiPrefix::Pico => -12,
            SiPrefix::Nano => -9,
            SiPrefix::Micro => -6,
            SiPrefix::Milli => -3,
            SiPrefix::Centi => -2,
            SiPrefix::Deci => -1,
            SiPrefix::Unit => 0,
            SiPrefix::Kilo => 3,
            SiPrefix::Mega => 6,
            SiPrefix::Giga => 9,
            SiPrefix::Tera => 12,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            SiPrefix::Pico => "p",
            SiPrefix::Nano => "n",
            SiPrefix::Micro => "u",
            SiPrefix::Milli => "m",
            SiPrefix::Centi => "c",
            SiPrefix::Deci => "d",
            SiPrefix::Unit => "",
            SiPrefix::Kilo => "k",
            SiPrefix::Mega => "M",
            SiPrefix::Giga => "G",
            SiPrefix::Tera => "T",
        }
    }

    /// Multiplicative value, `10^exponent`.
    pub fn factor(self) -> f64 {
        10f64.powi(self.exponent())
    }

    pub fn from_exponent(exponent: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.exponent() == exponent)
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.symbol() == symbol)
    }
}

impl core::fmt::Display for SiPrefix {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Round a decimal exponent to the nearest engineering step (multiple of 3).
pub fn engineering_exponent(power: i32) -> i32 {
    (f64::from(power) / 3.0).round() as i32 * 3
}

/// Prefix ladder for a population of values, ascending by exponent.
///
/// Only strictly positive, finite values count. Returns `None` when nothing
/// remains. The unscaled prefix is always part of the ladder; exponents
/// outside pico..tera are dropped.
pub fn prefix_ladder<I>(values: I) -> Option<Vec<SiPrefix>>
where
    I: IntoIterator<Item = f64>,
{
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    let low = engineering_exponent(min.log10().floor() as i32);
    let high = engineering_exponent(max.log10().floor() as i32);

    let mut ladder: Vec<SiPrefix> = (low..=high)
        .step_by(3)
        .filter_map(SiPrefix::from_exponent)
        .collect();
    if !ladder.contains(&SiPrefix::Unit) {
        ladder.push(SiPrefix::Unit);
        ladder.sort();
    }
    Some(ladder)
}

/// Latest prefix ladder computed for one component type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplierSet {
    /// Component type (subtype) the ladder was computed for.
    #[serde(rename = "type")]
    pub kind: String,
    /// Display unit for the type, e.g. `Ohm`.
    pub unit: String,
    pub prefixes: Vec<SiPrefix>,
    pub computed_at: DateTime<Utc>,
}

impl MultiplierSet {
    /// Prefixes joined with their factors and display labels.
    pub fn values(&self) -> Vec<MultiplierValue> {
        self.prefixes
            .iter()
            .map(|&prefix| MultiplierValue {
                prefix,
                label: format!("{}{}", prefix.symbol(), self.unit),
                value: prefix.factor(),
            })
            .collect()
    }
}

/// One rung of a multiplier ladder, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplierValue {
    pub prefix: SiPrefix,
    pub label: String,
    pub value: f64,
}

impl ValueObject for MultiplierValue {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponents_round_to_engineering_steps() {
        assert_eq!(engineering_exponent(0), 0);
        assert_eq!(engineering_exponent(1), 0);
        assert_eq!(engineering_exponent(2), 3);
        assert_eq!(engineering_exponent(4), 3);
        assert_eq!(engineering_exponent(6), 6);
        assert_eq!(engineering_exponent(-1), 0);
        assert_eq!(engineering_exponent(-2), -3);
        assert_eq!(engineering_exponent(-11), -12);
    }

    #[test]
    fn resistor_ladder_spans_kilo_to_mega() {
        let ladder = prefix_ladder([100.0, 4700.0, 1_000_000.0]).unwrap();
        for expected in [SiPrefix::Unit, SiPrefix::Kilo, SiPrefix::Mega] {
            assert!(ladder.contains(&expected), "{ladder:?}");
        }
        assert_eq!(ladder, vec![SiPrefix::Unit, SiPrefix::Kilo, SiPrefix::Mega]);
    }

    #[test]
    fn capacitor_ladder_is_ascending_and_includes_unit() {
        let ladder = prefix_ladder([22e-12, 100e-9, 4.7e-6]).unwrap();
        assert_eq!(
            ladder,
            vec![SiPrefix::Pico, SiPrefix::Nano, SiPrefix::Micro, SiPrefix::Unit]
        );
    }

    #[test]
    fn ladder_never_emits_centi_or_deci() {
        let ladder = prefix_ladder([0.01, 0.2, 5.0]).unwrap();
        assert!(!ladder.contains(&SiPrefix::Centi));
        assert!(!ladder.contains(&SiPrefix::Deci));
        assert_eq!(ladder, vec![SiPrefix::Milli, SiPrefix::Unit]);
    }

    #[test]
    fn zero_negative_and_non_finite_values_are_ignored() {
        assert_eq!(prefix_ladder([0.0, -5.0, f64::NAN]), None);
        assert_eq!(prefix_ladder(Vec::<f64>::new()), None);
        assert_eq!(prefix_ladder([0.0, 47.0]), Some(vec![SiPrefix::Unit]));
    }

    #[test]
    fn out_of_range_magnitudes_are_dropped() {
        let ladder = prefix_ladder([1e15]).unwrap();
        assert_eq!(ladder, vec![SiPrefix::Unit]);
    }

    #[test]
    fn prefixes_serialize_as_symbols() {
        let json = serde_json::to_string(&vec![SiPrefix::Unit, SiPrefix::Micro, SiPrefix::Mega]).unwrap();
        assert_eq!(json, r#"["","u","M"]"#);
        assert_eq!(SiPrefix::from_symbol("k"), Some(SiPrefix::Kilo));
        assert_eq!(SiPrefix::from_symbol("x"), None);
    }

    #[test]
    fn values_join_prefix_factor_and_unit() {
        let set = MultiplierSet {
            kind: "Resistor".to_string(),
            unit: "Ohm".to_string(),
            prefixes: vec![SiPrefix::Unit, SiPrefix::Kilo],
            computed_at: Utc::now(),
        };
        let values = set.values();
        assert_eq!(values[0].label, "Ohm");
        assert_eq!(values[0].value, 1.0);
        assert_eq!(values[1].label, "kOhm");
        assert_eq!(values[1].value, 1000.0);
    }
}
