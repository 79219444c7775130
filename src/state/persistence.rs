use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::models::item::format_quantity;
use crate::models::{Kitchen, MealPlan, Recipe, ShoppingListItem};

/// Load recipes and meal plans from a JSON file.
///
/// Deduplicates recipes by id and meal plans by lowercase name (last
/// occurrence wins); recipes come back sorted by id.
pub fn load_kitchen<P: AsRef<Path>>(path: P) -> Result<Kitchen> {
    let content = fs::read_to_string(path)?;
    let kitchen: Kitchen = serde_json::from_str(&content)?;

    let mut recipes: HashMap<i64, Recipe> = HashMap::new();
    for recipe in kitchen.recipes {
        recipes.insert(recipe.id, recipe);
    }
    let mut recipes: Vec<Recipe> = recipes.into_values().collect();
    recipes.sort_by_key(|r| r.id);

    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut meal_plans: Vec<MealPlan> = Vec::new();
    for plan in kitchen.meal_plans {
        match seen.get(&plan.key()) {
            Some(&pos) => meal_plans[pos] = plan,
            None => {
                seen.insert(plan.key(), meal_plans.len());
                meal_plans.push(plan);
            }
        }
    }

    debug!(
        recipes = recipes.len(),
        meal_plans = meal_plans.len(),
        "loaded kitchen"
    );
    Ok(Kitchen {
        recipes,
        meal_plans,
    })
}

/// Load a saved shopping list; a missing file is an empty list.
pub fn load_list<P: AsRef<Path>>(path: P) -> Result<Vec<ShoppingListItem>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Save a shopping list to a JSON file.
pub fn save_list<P: AsRef<Path>>(path: P, items: &[ShoppingListItem]) -> Result<()> {
    let json = serde_json::to_string_pretty(items)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write the list as CSV: category,name,quantity,unit,checked,recipes.
pub fn export_csv<P: AsRef<Path>>(path: P, items: &[ShoppingListItem]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["category", "name", "quantity", "unit", "checked", "recipes"])?;

    for item in items {
        writer.write_record([
            item.category.as_deref().unwrap_or(""),
            item.name.as_str(),
            format_quantity(item.quantity).as_str(),
            item.unit.as_str(),
            if item.checked { "true" } else { "false" },
            item.recipes.join("; ").as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
