use serde::{Deserialize, Serialize};

use crate::models::item::AggregatedItem;

/// A persisted shopping-list row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub ingredient_id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub recipes: Vec<String>,
    #[serde(default)]
    pub checked: bool,
}

impl ShoppingListItem {
    /// Merge identity within a list.
    pub fn matches(&self, item: &AggregatedItem) -> bool {
        self.ingredient_id == item.ingredient_id && self.unit == item.unit
    }

    pub fn to_aggregated(&self) -> AggregatedItem {
        AggregatedItem {
            ingredient_id: self.ingredient_id,
            name: self.name.clone(),
            category: self.category.clone(),
            quantity: self.quantity,
            unit: self.unit.clone(),
            recipes: self.recipes.clone(),
        }
    }
}

impl From<AggregatedItem> for ShoppingListItem {
    fn from(item: AggregatedItem) -> Self {
        Self {
            ingredient_id: item.ingredient_id,
            name: item.name,
            category: item.category,
            quantity: item.quantity,
            unit: item.unit,
            recipes: item.recipes,
            checked: false,
        }
    }
}
