use std::collections::HashMap;

use crate::error::{Result, ShopError};
use crate::models::{IngredientUsage, MealPlan, Recipe};

fn recipe_usages(
    recipe: &Recipe,
    used_servings: f64,
) -> impl Iterator<Item = IngredientUsage> + '_ {
    recipe.ingredients.iter().map(move |line| IngredientUsage {
        ingredient_id: line.ingredient_id,
        name: line.name.clone(),
        category: line.category.clone(),
        quantity: line.quantity,
        unit: line.unit.clone(),
        recipe_servings: recipe.servings,
        used_servings,
        recipe_title: recipe.title.clone(),
    })
}

/// Usages for every entry of the given meal plans.
///
/// Each entry scales its recipe to the entry's servings.
pub fn usages_from_meal_plans(
    plans: &[&MealPlan],
    recipes: &[Recipe],
) -> Result<Vec<IngredientUsage>> {
    let by_id: HashMap<i64, &Recipe> = recipes.iter().map(|r| (r.id, r)).collect();

    let mut usages = Vec::new();
    for plan in plans {
        for entry in &plan.entries {
            let recipe = by_id
                .get(&entry.recipe_id)
                .ok_or(ShopError::RecipeNotFound(entry.recipe_id))?;
            usages.extend(recipe_usages(recipe, entry.servings));
        }
    }
    Ok(usages)
}

/// Usages for a raw recipe list, each at its own serving count.
pub fn usages_from_recipes(recipes: &[&Recipe]) -> Vec<IngredientUsage> {
    recipes
        .iter()
        .flat_map(|recipe| recipe_usages(recipe, recipe.servings))
        .collect()
}
