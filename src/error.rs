use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopError {
    #[error("{}", unknown_unit_message(.unit, .ingredient, .suggestion))]
    UnknownUnit {
        unit: String,
        ingredient: Option<String>,
        suggestion: Option<&'static str>,
    },

    #[error("Invalid servings for recipe '{recipe}': {servings} (must be > 0)")]
    InvalidServings { recipe: String, servings: f64 },

    #[error("Invalid quantity for ingredient '{ingredient}' in '{recipe}': {value}")]
    InvalidQuantity {
        ingredient: String,
        recipe: String,
        value: f64,
    },

    #[error("Recipe not found: {0}")]
    RecipeNotFound(i64),

    #[error("Meal plan not found: {0}")]
    MealPlanNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn unknown_unit_message(
    unit: &str,
    ingredient: &Option<String>,
    suggestion: &Option<&'static str>,
) -> String {
    let mut msg = format!("Unknown unit '{}'", unit);
    if let Some(name) = ingredient {
        msg.push_str(&format!(" for ingredient '{}'", name));
    }
    if let Some(s) = suggestion {
        msg.push_str(&format!(" (did you mean '{}'?)", s));
    }
    msg
}

pub type Result<T> = std::result::Result<T, ShopError>;
