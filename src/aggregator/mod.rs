pub mod aggregate;
pub mod sources;

pub use aggregate::{
    aggregate, compare_items, merge_display_items, AggregationEntry, AggregationKey, Aggregator,
};
pub use sources::{usages_from_meal_plans, usages_from_recipes};
