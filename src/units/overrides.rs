use std::collections::HashMap;
use std::sync::LazyLock;

use crate::units::constants::*;
use crate::units::table::{self, MeasurementSystem};

/// A raw count unit that is not one-to-one with a rule's display unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountBucket {
    pub unit: &'static str,
    /// Display units represented by one of `unit`.
    pub display_per_unit: f64,
}

/// Ingredient-specific display rule.
///
/// Weight and volume convert linearly through `grams_per_unit` and
/// `ml_per_unit`. In the count system, units in `one_to_one` count one display
/// unit per item and units in `count_buckets` are rescaled. Every other count
/// unit is kept in its own bucket and left to generic conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideRule {
    pub names: &'static [&'static str],
    pub display_unit: &'static str,
    pub systems: &'static [MeasurementSystem],
    pub grams_per_unit: Option<f64>,
    pub ml_per_unit: Option<f64>,
    pub count_buckets: &'static [CountBucket],
    pub one_to_one: &'static [&'static str],
    /// Below this many display units the rule does not apply.
    pub min_quantity: f64,
}

impl OverrideRule {
    pub fn applies_to(&self, system: MeasurementSystem) -> bool {
        self.systems.contains(&system)
    }

    pub fn bucket(&self, unit: &str) -> Option<&CountBucket> {
        self.count_buckets.iter().find(|b| b.unit == unit)
    }

    /// Convert a base quantity into display units, ignoring the threshold.
    fn convert(
        &self,
        base_quantity: f64,
        system: MeasurementSystem,
        original_units: &[String],
    ) -> Option<f64> {
        match system {
            MeasurementSystem::Weight => self.grams_per_unit.map(|g| base_quantity / g),
            MeasurementSystem::Volume => self.ml_per_unit.map(|ml| base_quantity / ml),
            MeasurementSystem::Count => {
                let bucket = original_units.first().and_then(|u| self.bucket(u));
                match bucket {
                    Some(b) => {
                        let factor = table::lookup(b.unit).ok()?.factor_to_base;
                        Some(base_quantity / factor * b.display_per_unit)
                    }
                    None => original_units
                        .iter()
                        .all(|u| self.one_to_one.contains(&u.as_str()))
                        .then_some(base_quantity),
                }
            }
        }
    }
}

const ALL_SYSTEMS: &[MeasurementSystem] = &[
    MeasurementSystem::Weight,
    MeasurementSystem::Volume,
    MeasurementSystem::Count,
];

/// Built-in rules.
pub const DEFAULT_RULES: &[OverrideRule] = &[
    OverrideRule {
        names: &["garlic"],
        display_unit: "clove",
        systems: ALL_SYSTEMS,
        grams_per_unit: Some(GARLIC_GRAMS_PER_CLOVE),
        ml_per_unit: Some(GARLIC_ML_PER_CLOVE),
        count_buckets: &[
            CountBucket {
                unit: "head",
                display_per_unit: GARLIC_CLOVES_PER_HEAD,
            },
            CountBucket {
                unit: "whole",
                display_per_unit: GARLIC_CLOVES_PER_HEAD,
            },
        ],
        one_to_one: &["clove", "piece"],
        min_quantity: 0.0,
    },
    OverrideRule {
        names: &["basil", "parsley", "cilantro", "coriander", "dill", "mint", "chives"],
        display_unit: "bunch",
        systems: ALL_SYSTEMS,
        grams_per_unit: Some(HERB_GRAMS_PER_BUNCH),
        ml_per_unit: Some(HERB_ML_PER_BUNCH),
        count_buckets: &[
            CountBucket {
                unit: "sprig",
                display_per_unit: 1.0 / HERB_SPRIGS_PER_BUNCH,
            },
            CountBucket {
                unit: "bunch",
                display_per_unit: 1.0,
            },
        ],
        one_to_one: &[],
        min_quantity: HERB_MIN_BUNCHES,
    },
];

/// Immutable registry of override rules keyed by normalized ingredient name.
#[derive(Debug)]
pub struct OverrideRuleSet {
    rules: HashMap<String, &'static OverrideRule>,
}

static DEFAULT_SET: LazyLock<OverrideRuleSet> =
    LazyLock::new(|| OverrideRuleSet::new(DEFAULT_RULES));

/// Case-insensitive, trimmed ingredient name.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

impl OverrideRuleSet {
    /// Build a registry; later rules win on duplicate names.
    pub fn new(rules: &'static [OverrideRule]) -> Self {
        let mut map = HashMap::new();
        for rule in rules {
            for name in rule.names {
                map.insert(normalize_name(name), rule);
            }
        }
        Self { rules: map }
    }

    /// The shared built-in registry.
    pub fn builtin() -> &'static OverrideRuleSet {
        &DEFAULT_SET
    }

    pub fn rule_for(&self, name: &str) -> Option<&'static OverrideRule> {
        self.rules.get(&normalize_name(name)).copied()
    }

    /// Count sub-bucket for a raw unit, if the ingredient's count rule keeps it apart.
    ///
    /// Units one-to-one with the display unit share the unbucketed entry.
    pub fn count_bucket(&self, name: &str, unit: &str) -> Option<&'static str> {
        let rule = self.rule_for(name)?;
        if !rule.applies_to(MeasurementSystem::Count) {
            return None;
        }
        let symbol = table::lookup(unit).ok()?.symbol;
        if rule.one_to_one.contains(&symbol) {
            return None;
        }
        Some(symbol)
    }

    /// Display quantity and unit for an accumulated entry, or `None` to fall
    /// back to generic conversion.
    pub fn apply(
        &self,
        name: &str,
        base_quantity: f64,
        system: MeasurementSystem,
        original_units: &[String],
    ) -> Option<(f64, &'static str)> {
        let rule = self.rule_for(name)?;
        if !rule.applies_to(system) {
            return None;
        }
        let quantity = rule.convert(base_quantity, system, original_units)?;
        if quantity < rule.min_quantity {
            return None;
        }
        Some((quantity, rule.display_unit))
    }

    /// Registered names with their display units, sorted by name.
    pub fn entries(&self) -> Vec<(&str, &'static str)> {
        let mut entries: Vec<(&str, &'static str)> = self
            .rules
            .iter()
            .map(|(name, rule)| (name.as_str(), rule.display_unit))
            .collect();
        entries.sort();
        entries
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for OverrideRuleSet {
    fn default() -> Self {
        Self::new(DEFAULT_RULES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rule_lookup_is_normalized() {
        let set = OverrideRuleSet::builtin();
        assert!(set.rule_for("  Garlic ").is_some());
        assert!(set.rule_for("CILANTRO").is_some());
        assert!(set.rule_for("flour").is_none());
    }

    #[test]
    fn test_garlic_head_bucket_converts_to_cloves() {
        let set = OverrideRuleSet::builtin();
        // One head is 10 items in the generic table.
        let result = set.apply("garlic", 10.0, MeasurementSystem::Count, &units(&["head"]));
        let (q, unit) = result.unwrap();
        assert_eq!(unit, "clove");
        assert!((q - GARLIC_CLOVES_PER_HEAD).abs() < 1e-9);
    }

    #[test]
    fn test_garlic_volume_converts_to_cloves() {
        let set = OverrideRuleSet::builtin();
        let (q, unit) = set
            .apply("garlic", 10.0, MeasurementSystem::Volume, &units(&["tsp"]))
            .unwrap();
        assert_eq!(unit, "clove");
        assert!((q - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_herb_below_threshold_falls_back() {
        let set = OverrideRuleSet::builtin();
        let result = set.apply(
            "basil",
            25.0,
            MeasurementSystem::Volume,
            &units(&["tbsp", "tsp"]),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_herb_above_threshold_uses_bunches() {
        let set = OverrideRuleSet::builtin();
        let (q, unit) = set
            .apply("parsley", 480.0, MeasurementSystem::Volume, &units(&["cup"]))
            .unwrap();
        assert_eq!(unit, "bunch");
        assert!((q - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_count_bucket_only_for_registered_units() {
        let set = OverrideRuleSet::builtin();
        assert_eq!(set.count_bucket("garlic", "head"), Some("head"));
        assert_eq!(set.count_bucket("garlic", "clove"), None);
        assert_eq!(set.count_bucket("garlic", "whole"), Some("whole"));
        assert_eq!(set.count_bucket("basil", "head"), Some("head"));
        assert_eq!(set.count_bucket("basil", "sprig"), Some("sprig"));
        assert_eq!(set.count_bucket("lettuce", "head"), None);
    }

    #[test]
    fn test_herb_head_and_piece_are_not_bunches() {
        let set = OverrideRuleSet::builtin();
        assert!(set
            .apply("dill", 10.0, MeasurementSystem::Count, &units(&["head"]))
            .is_none());
        assert!(set
            .apply("basil", 2.0, MeasurementSystem::Count, &units(&["piece"]))
            .is_none());
    }

    #[test]
    fn test_garlic_whole_counts_as_a_head() {
        let set = OverrideRuleSet::builtin();
        let (q, unit) = set
            .apply("garlic", 2.0, MeasurementSystem::Count, &units(&["whole"]))
            .unwrap();
        assert_eq!(unit, "clove");
        assert!((q - 2.0 * GARLIC_CLOVES_PER_HEAD).abs() < 1e-9);
    }

    #[test]
    fn test_entries_list_every_registered_name() {
        let set = OverrideRuleSet::builtin();
        let entries = set.entries();
        assert_eq!(entries.len(), set.len());
        assert!(!set.is_empty());
        assert_eq!(entries[0], ("basil", "bunch"));
        assert!(entries.contains(&("garlic", "clove")));
    }

    #[test]
    fn test_apply_is_deterministic() {
        let set = OverrideRuleSet::builtin();
        let a = set.apply("dill", 300.0, MeasurementSystem::Volume, &units(&["ml"]));
        let b = set.apply("dill", 300.0, MeasurementSystem::Volume, &units(&["ml"]));
        assert_eq!(a, b);
    }
}
