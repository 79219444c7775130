use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::error::{Result, ShopError};
use crate::models::item::insert_ordered;
use crate::models::{AggregatedItem, IngredientUsage};
use crate::units::{self, MeasurementSystem, OverrideRuleSet};

/// Grouping identity under which base quantities are summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AggregationKey {
    pub ingredient_id: i64,
    pub system: MeasurementSystem,
    /// Set only for count units an override rule keeps apart (e.g. garlic heads).
    pub count_sub_key: Option<&'static str>,
}

/// Running total for one key.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationEntry {
    pub ingredient_id: i64,
    pub name: String,
    pub category: Option<String>,
    pub system: MeasurementSystem,
    /// Sum in the system's base unit, never rounded.
    pub base_quantity: f64,
    /// Canonical unit symbols in first-seen order.
    pub original_units: Vec<String>,
    pub recipe_titles: Vec<String>,
}

impl AggregationEntry {
    fn new(line: &Line<'_>, system: MeasurementSystem) -> Self {
        Self {
            ingredient_id: line.ingredient_id,
            name: line.name.to_string(),
            category: line.category.clone(),
            system,
            base_quantity: 0.0,
            original_units: Vec::new(),
            recipe_titles: Vec::new(),
        }
    }

    fn add(&mut self, base_quantity: f64, unit: &str, recipes: &[String]) {
        self.base_quantity += base_quantity;
        insert_ordered(&mut self.original_units, unit);
        for recipe in recipes {
            insert_ordered(&mut self.recipe_titles, recipe);
        }
    }
}

/// A quantity already scaled to the servings cooked, from a usage or a
/// previously aggregated item.
#[derive(Debug, Clone, Copy)]
struct Line<'u> {
    ingredient_id: i64,
    name: &'u str,
    category: &'u Option<String>,
    quantity: f64,
    unit: &'u str,
    recipes: &'u [String],
}

impl<'u> Line<'u> {
    fn from_usage(usage: &'u IngredientUsage) -> Self {
        Self {
            ingredient_id: usage.ingredient_id,
            name: &usage.name,
            category: &usage.category,
            quantity: usage.adjusted_quantity(),
            unit: &usage.unit,
            recipes: std::slice::from_ref(&usage.recipe_title),
        }
    }

    fn from_item(item: &'u AggregatedItem) -> Self {
        Self {
            ingredient_id: item.ingredient_id,
            name: &item.name,
            category: &item.category,
            quantity: item.quantity,
            unit: &item.unit,
            recipes: &item.recipes,
        }
    }
}

/// Turns ingredient usages into a summed, display-ready shopping list.
///
/// Aggregation runs in two stages: usages are summed in base units per
/// [`AggregationKey`], then each entry is converted to a display unit and the
/// results are merged again on `(ingredient_id, unit)`.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    rules: &'a OverrideRuleSet,
}

impl Default for Aggregator<'static> {
    fn default() -> Self {
        Self::new(OverrideRuleSet::builtin())
    }
}

impl<'a> Aggregator<'a> {
    pub fn new(rules: &'a OverrideRuleSet) -> Self {
        Self { rules }
    }

    /// Aggregate usages into shopping-list items sorted by ingredient name.
    ///
    /// Fails without partial output on the first invalid usage.
    pub fn aggregate(&self, usages: &[IngredientUsage]) -> Result<Vec<AggregatedItem>> {
        let entries = self.accumulate(usages)?;
        let resolved = self.resolve(&entries);
        let items = merge_display_items(resolved);

        info!(
            usages = usages.len(),
            entries = entries.len(),
            items = items.len(),
            "aggregated shopping list"
        );
        Ok(items)
    }

    /// First stage: validate and sum usages per aggregation key.
    ///
    /// Entries are returned in key order.
    pub fn accumulate(&self, usages: &[IngredientUsage]) -> Result<Vec<AggregationEntry>> {
        validate(usages)?;
        self.fold(usages.iter().map(Line::from_usage).collect())
    }

    /// Re-aggregate display items, e.g. an existing list plus new items.
    ///
    /// Items go back to base units and through the same two stages as
    /// usages, so adding to a list matches aggregating everything at once.
    pub fn combine(&self, items: &[AggregatedItem]) -> Result<Vec<AggregatedItem>> {
        for item in items {
            if !item.quantity.is_finite() || item.quantity < 0.0 {
                return Err(ShopError::InvalidQuantity {
                    ingredient: item.name.clone(),
                    recipe: item.recipes.join(", "),
                    value: item.quantity,
                });
            }
        }
        let entries = self.fold(items.iter().map(Line::from_item).collect())?;
        let merged = merge_display_items(self.resolve(&entries));

        info!(
            items_in = items.len(),
            items_out = merged.len(),
            "combined shopping list items"
        );
        Ok(merged)
    }

    fn fold(&self, mut lines: Vec<Line<'_>>) -> Result<Vec<AggregationEntry>> {
        lines.sort_by(canonical_order);

        let mut entries: HashMap<AggregationKey, AggregationEntry> = HashMap::new();
        for line in &lines {
            let unit = units::lookup(line.unit).map_err(|_| {
                warn!(unit = %line.unit, ingredient = %line.name, "unknown unit");
                ShopError::UnknownUnit {
                    unit: line.unit.to_string(),
                    ingredient: Some(line.name.to_string()),
                    suggestion: units::suggest_unit(line.unit),
                }
            })?;

            let base_quantity = line.quantity * unit.factor_to_base;
            let count_sub_key = match unit.system {
                MeasurementSystem::Count => self.rules.count_bucket(line.name, unit.symbol),
                _ => None,
            };
            let key = AggregationKey {
                ingredient_id: line.ingredient_id,
                system: unit.system,
                count_sub_key,
            };

            entries
                .entry(key)
                .or_insert_with(|| AggregationEntry::new(line, unit.system))
                .add(base_quantity, unit.symbol, line.recipes);
        }

        let mut keyed: Vec<(AggregationKey, AggregationEntry)> = entries.into_iter().collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(keyed.into_iter().map(|(_, e)| e).collect())
    }

    /// Second stage input: convert each entry to a display unit, unrounded.
    pub fn resolve(&self, entries: &[AggregationEntry]) -> Vec<AggregatedItem> {
        entries.iter().map(|entry| self.resolve_entry(entry)).collect()
    }

    fn resolve_entry(&self, entry: &AggregationEntry) -> AggregatedItem {
        let overridden = self.rules.apply(
            &entry.name,
            entry.base_quantity,
            entry.system,
            &entry.original_units,
        );

        let (quantity, unit) = match overridden {
            Some(result) => result,
            None => units::from_base(
                entry.base_quantity,
                entry.system,
                entry.original_units.first().map(String::as_str),
            ),
        };

        debug!(
            ingredient = %entry.name,
            system = %entry.system,
            base = entry.base_quantity,
            quantity,
            unit,
            overridden = overridden.is_some(),
            "resolved entry"
        );

        AggregatedItem {
            ingredient_id: entry.ingredient_id,
            name: entry.name.clone(),
            category: entry.category.clone(),
            quantity,
            unit: unit.to_string(),
            recipes: entry.recipe_titles.clone(),
        }
    }
}

/// Aggregate with the built-in override rules.
pub fn aggregate(usages: &[IngredientUsage]) -> Result<Vec<AggregatedItem>> {
    Aggregator::default().aggregate(usages)
}

/// Merge display items sharing `(ingredient_id, unit)`, round, and sort.
///
/// Recipe titles of each output item are sorted, so an item reads the same
/// whichever accumulation entries it was merged from.
pub fn merge_display_items(items: Vec<AggregatedItem>) -> Vec<AggregatedItem> {
    let mut index: HashMap<(i64, String), usize> = HashMap::new();
    let mut merged: Vec<AggregatedItem> = Vec::new();

    for item in items {
        let key = (item.ingredient_id, item.unit.clone());
        match index.get(&key) {
            Some(&pos) => {
                let target = &mut merged[pos];
                target.quantity += item.quantity;
                for recipe in &item.recipes {
                    insert_ordered(&mut target.recipes, recipe);
                }
            }
            None => {
                index.insert(key, merged.len());
                merged.push(item);
            }
        }
    }

    for item in merged.iter_mut() {
        item.quantity = units::round_output(item.quantity);
        item.recipes.sort();
    }
    merged.sort_by(compare_items);
    merged
}

/// Ordering for output: name (case-insensitive), then unit, then id.
pub fn compare_items(a: &AggregatedItem, b: &AggregatedItem) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.unit.cmp(&b.unit))
        .then_with(|| a.ingredient_id.cmp(&b.ingredient_id))
}

fn validate(usages: &[IngredientUsage]) -> Result<()> {
    for usage in usages {
        if !usage.recipe_servings.is_finite() || usage.recipe_servings <= 0.0 {
            return Err(ShopError::InvalidServings {
                recipe: usage.recipe_title.clone(),
                servings: usage.recipe_servings,
            });
        }
        for value in [usage.quantity, usage.used_servings] {
            if !value.is_finite() || value < 0.0 {
                return Err(ShopError::InvalidQuantity {
                    ingredient: usage.name.clone(),
                    recipe: usage.recipe_title.clone(),
                    value,
                });
            }
        }
    }
    Ok(())
}

/// Fold order independent of how the caller listed usages.
fn canonical_order(a: &Line<'_>, b: &Line<'_>) -> Ordering {
    a.ingredient_id
        .cmp(&b.ingredient_id)
        .then_with(|| a.recipes.cmp(b.recipes))
        .then_with(|| units::normalize_unit(a.unit).cmp(&units::normalize_unit(b.unit)))
        .then_with(|| a.quantity.total_cmp(&b.quantity))
}
