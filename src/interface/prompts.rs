use dialoguer::{Confirm, MultiSelect, Select};
use strsim::jaro_winkler;

use crate::error::{Result, ShopError};
use crate::models::item::format_quantity;
use crate::models::{Kitchen, MealPlan, ShoppingListItem};

/// Resolve a meal plan name, falling back to fuzzy matching.
pub fn resolve_meal_plan<'a>(kitchen: &'a Kitchen, input: &str) -> Result<&'a MealPlan> {
    if let Some(plan) = kitchen.meal_plan(input) {
        return Ok(plan);
    }

    let input = input.trim().to_lowercase();
    let mut candidates: Vec<(&MealPlan, f64)> = kitchen
        .meal_plans
        .iter()
        .map(|p| (p, jaro_winkler(&p.key(), &input)))
        .filter(|(_, score)| *score > 0.7)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    if candidates.is_empty() {
        return Err(ShopError::MealPlanNotFound(input));
    }

    if candidates.len() == 1 {
        let plan = candidates[0].0;
        let confirm = Confirm::new()
            .with_prompt(format!("Did you mean '{}'?", plan.name))
            .default(true)
            .interact()?;

        return if confirm {
            Ok(plan)
        } else {
            Err(ShopError::MealPlanNotFound(input))
        };
    }

    // Multiple matches - let user select
    let options: Vec<&MealPlan> = candidates.iter().take(5).map(|(p, _)| *p).collect();
    let mut labels: Vec<String> = options.iter().map(|p| p.name.clone()).collect();
    labels.push("None of these".to_string());

    let selection = Select::new()
        .with_prompt("Which meal plan did you mean?")
        .items(&labels)
        .default(0)
        .interact()?;

    options
        .get(selection)
        .copied()
        .ok_or(ShopError::MealPlanNotFound(input))
}

/// Let the user tick off bought items. Returns the new checked flags.
pub fn prompt_check_items(items: &[ShoppingListItem]) -> Result<Vec<bool>> {
    let labels: Vec<String> = items
        .iter()
        .map(|i| format!("{} - {} {}", i.name, format_quantity(i.quantity), i.unit))
        .collect();
    let defaults: Vec<bool> = items.iter().map(|i| i.checked).collect();

    let chosen = MultiSelect::new()
        .with_prompt("Select bought items (space to toggle, enter to confirm)")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    let mut checked = vec![false; items.len()];
    for index in chosen {
        checked[index] = true;
    }
    Ok(checked)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
