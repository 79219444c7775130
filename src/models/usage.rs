use serde::{Deserialize, Serialize};

/// One recipe line as consumed by one meal-plan entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientUsage {
    pub ingredient_id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub recipe_servings: f64,
    pub used_servings: f64,
    pub recipe_title: String,
}

impl IngredientUsage {
    /// Servings ratio: `used_servings / recipe_servings`.
    #[inline]
    pub fn servings_ratio(&self) -> f64 {
        self.used_servings / self.recipe_servings
    }

    /// Quantity scaled to the servings actually cooked.
    #[inline]
    pub fn adjusted_quantity(&self) -> f64 {
        self.quantity * self.servings_ratio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjusted_quantity_halves_for_half_servings() {
        let usage = IngredientUsage {
            ingredient_id: 1,
            name: "Rice".to_string(),
            category: Some("grains".to_string()),
            quantity: 300.0,
            unit: "g".to_string(),
            recipe_servings: 4.0,
            used_servings: 2.0,
            recipe_title: "Pilaf".to_string(),
        };
        assert!((usage.servings_ratio() - 0.5).abs() < 1e-9);
        assert!((usage.adjusted_quantity() - 150.0).abs() < 1e-9);
    }
}
