use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::{Result, ShopError};
use crate::units::constants::*;

/// Measurement system a unit belongs to.
///
/// Quantities are only summable within one system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MeasurementSystem {
    Weight,
    Volume,
    Count,
}

impl MeasurementSystem {
    /// Canonical base unit the system accumulates in.
    pub fn base_unit(&self) -> &'static str {
        match self {
            MeasurementSystem::Weight => BASE_WEIGHT_UNIT,
            MeasurementSystem::Volume => BASE_VOLUME_UNIT,
            MeasurementSystem::Count => BASE_COUNT_UNIT,
        }
    }

    pub fn all() -> [MeasurementSystem; 3] {
        [
            MeasurementSystem::Weight,
            MeasurementSystem::Volume,
            MeasurementSystem::Count,
        ]
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MeasurementSystem::Weight => "weight",
            MeasurementSystem::Volume => "volume",
            MeasurementSystem::Count => "count",
        };
        f.write_str(name)
    }
}

/// A recognized unit and its linear factor into the system's base unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDefinition {
    pub symbol: &'static str,
    pub system: MeasurementSystem,
    pub factor_to_base: f64,
}

impl UnitDefinition {
    const fn new(symbol: &'static str, system: MeasurementSystem, factor_to_base: f64) -> Self {
        Self {
            symbol,
            system,
            factor_to_base,
        }
    }
}

use MeasurementSystem::{Count, Volume, Weight};

/// The closed cooking-unit vocabulary.
pub const UNITS: [UnitDefinition; 20] = [
    UnitDefinition::new("mg", Weight, 0.001),
    UnitDefinition::new("g", Weight, 1.0),
    UnitDefinition::new("kg", Weight, 1000.0),
    UnitDefinition::new("oz", Weight, 28.349523125),
    UnitDefinition::new("lb", Weight, 453.59237),
    UnitDefinition::new("ml", Volume, 1.0),
    UnitDefinition::new("l", Volume, 1000.0),
    UnitDefinition::new("tsp", Volume, 5.0),
    UnitDefinition::new("tbsp", Volume, 15.0),
    UnitDefinition::new("cup", Volume, 240.0),
    UnitDefinition::new("floz", Volume, 29.5735),
    UnitDefinition::new("pinch", Volume, 0.3125),
    UnitDefinition::new("piece", Count, 1.0),
    UnitDefinition::new("whole", Count, 1.0),
    UnitDefinition::new("clove", Count, 1.0),
    UnitDefinition::new("slice", Count, 1.0),
    UnitDefinition::new("can", Count, 1.0),
    UnitDefinition::new("sprig", Count, 1.0),
    UnitDefinition::new("bunch", Count, 1.0),
    UnitDefinition::new("head", Count, HEAD_FACTOR),
];

static UNIT_INDEX: LazyLock<HashMap<&'static str, &'static UnitDefinition>> =
    LazyLock::new(|| UNITS.iter().map(|u| (u.symbol, u)).collect());

/// Trim, lowercase and resolve aliases; no validation.
pub fn normalize_unit(symbol: &str) -> String {
    let lowered = symbol.trim().to_lowercase();
    match UNIT_ALIASES.get(lowered.as_str()) {
        Some(canonical) => canonical.to_string(),
        None => lowered,
    }
}

/// Look up a unit by symbol or alias (case-insensitive).
pub fn lookup(symbol: &str) -> Result<&'static UnitDefinition> {
    let normalized = normalize_unit(symbol);
    UNIT_INDEX
        .get(normalized.as_str())
        .copied()
        .ok_or_else(|| ShopError::UnknownUnit {
            unit: symbol.to_string(),
            ingredient: None,
            suggestion: suggest_unit(symbol),
        })
}

/// Convert a quantity into its system's base unit.
///
/// Returns (base_quantity, system).
pub fn to_base(quantity: f64, symbol: &str) -> Result<(f64, MeasurementSystem)> {
    let unit = lookup(symbol)?;
    Ok((quantity * unit.factor_to_base, unit.system))
}

/// Convert a base quantity back to a display unit.
///
/// Uses `preferred` when it is a known unit of `system`, otherwise the
/// system's base unit. Returns (quantity, symbol).
pub fn from_base(
    base_quantity: f64,
    system: MeasurementSystem,
    preferred: Option<&str>,
) -> (f64, &'static str) {
    let preferred = preferred
        .and_then(|s| lookup(s).ok())
        .filter(|u| u.system == system);

    match preferred {
        Some(unit) => (base_quantity / unit.factor_to_base, unit.symbol),
        None => (base_quantity, system.base_unit()),
    }
}

/// Closest known unit to an unrecognized symbol, if any is close enough.
pub fn suggest_unit(symbol: &str) -> Option<&'static str> {
    let lowered = symbol.trim().to_lowercase();
    let candidates = UNITS
        .iter()
        .map(|u| (u.symbol, u.symbol))
        .chain(UNIT_ALIASES.iter().map(|(alias, canonical)| (*alias, *canonical)));

    let mut best: Option<(&'static str, f64)> = None;
    for (form, canonical) in candidates {
        let score = jaro_winkler(&lowered, form);
        if score < UNIT_SUGGESTION_THRESHOLD {
            continue;
        }
        // Equal scores resolve to the smaller symbol.
        let better = match best {
            None => true,
            Some((current, best_score)) => {
                score > best_score || (score == best_score && canonical < current)
            }
        };
        if better {
            best = Some((canonical, score));
        }
    }
    best.map(|(s, _)| s)
}

/// All units of one system, in table order.
pub fn units_of(system: MeasurementSystem) -> Vec<&'static UnitDefinition> {
    UNITS.iter().filter(|u| u.system == system).collect()
}

/// Round a display quantity to the output precision.
pub fn round_output(quantity: f64) -> f64 {
    let scale = 10f64.powi(OUTPUT_DECIMALS);
    (quantity * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_units() {
        let kg = lookup("kg").unwrap();
        assert_eq!(kg.system, Weight);
        assert!((kg.factor_to_base - 1000.0).abs() < 1e-9);

        let tbsp = lookup("tbsp").unwrap();
        assert_eq!(tbsp.system, Volume);
        assert!((tbsp.factor_to_base - 15.0).abs() < 1e-9);

        let head = lookup("head").unwrap();
        assert_eq!(head.system, Count);
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_resolves_aliases() {
        assert_eq!(lookup(" KG ").unwrap().symbol, "kg");
        assert_eq!(lookup("Tablespoons").unwrap().symbol, "tbsp");
        assert_eq!(lookup("cloves").unwrap().symbol, "clove");
    }

    #[test]
    fn test_lookup_unknown_unit() {
        let err = lookup("smidgen").unwrap_err();
        match err {
            ShopError::UnknownUnit { unit, .. } => assert_eq!(unit, "smidgen"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_to_base() {
        let (q, system) = to_base(2.0, "cup").unwrap();
        assert_eq!(system, Volume);
        assert!((q - 480.0).abs() < 1e-9);

        let (q, system) = to_base(1.0, "kg").unwrap();
        assert_eq!(system, Weight);
        assert!((q - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_base_uses_compatible_preference() {
        let (q, unit) = from_base(25.0, Volume, Some("tbsp"));
        assert_eq!(unit, "tbsp");
        assert!((q - 25.0 / 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_base_ignores_incompatible_preference() {
        let (q, unit) = from_base(1200.0, Weight, Some("cup"));
        assert_eq!(unit, "g");
        assert!((q - 1200.0).abs() < 1e-9);

        let (_, unit) = from_base(3.0, Count, None);
        assert_eq!(unit, "piece");

        let (_, unit) = from_base(3.0, Volume, Some("smidgen"));
        assert_eq!(unit, "ml");
    }

    #[test]
    fn test_round_trip_every_unit() {
        for unit in UNITS.iter() {
            let q = 3.7;
            let (base, system) = to_base(q, unit.symbol).unwrap();
            let (back, symbol) = from_base(base, system, Some(unit.symbol));
            assert_eq!(symbol, unit.symbol);
            assert!((back - q).abs() < 1e-9, "{} round trip drifted", unit.symbol);
        }
    }

    #[test]
    fn test_suggest_unit() {
        assert_eq!(suggest_unit("tablespon"), Some("tbsp"));
        assert_eq!(suggest_unit("gramms"), Some("g"));
        assert_eq!(suggest_unit("xyzzy"), None);
    }

    #[test]
    fn test_round_output() {
        assert!((round_output(1.666_666) - 1.67).abs() < 1e-9);
        assert!((round_output(12.0) - 12.0).abs() < 1e-9);
    }
}
