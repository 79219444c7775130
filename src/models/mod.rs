pub mod item;
pub mod recipe;
pub mod shopping_list;
pub mod usage;

pub use item::{AggregatedItem, CategoryGroup};
pub use recipe::{Kitchen, MealPlan, MealPlanEntry, Recipe, RecipeIngredient};
pub use shopping_list::ShoppingListItem;
pub use usage::IngredientUsage;
