use serde::{Deserialize, Serialize};

/// One ingredient line of a stored recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub ingredient_id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub quantity: f64,
    pub unit: String,
}

/// A recipe as handed over by the recipe service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    /// Servings the listed quantities are written for.
    pub servings: f64,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
}

/// A recipe scheduled in a meal plan, cooked for `servings` people.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanEntry {
    pub recipe_id: i64,
    pub servings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<MealPlanEntry>,
}

impl MealPlan {
    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

/// Recipes and meal plans exported by the recipe and planning services.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Kitchen {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub meal_plans: Vec<MealPlan>,
}

impl Kitchen {
    /// Find a meal plan by name (case-insensitive).
    pub fn meal_plan(&self, name: &str) -> Option<&MealPlan> {
        let key = name.trim().to_lowercase();
        self.meal_plans.iter().find(|p| p.key() == key)
    }

    pub fn recipe(&self, id: i64) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }
}
