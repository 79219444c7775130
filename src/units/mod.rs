pub mod constants;
pub mod overrides;
pub mod table;

pub use overrides::{CountBucket, OverrideRule, OverrideRuleSet, DEFAULT_RULES};
pub use table::{
    from_base, lookup, normalize_unit, round_output, suggest_unit, to_base, units_of,
    MeasurementSystem, UnitDefinition, UNITS,
};
