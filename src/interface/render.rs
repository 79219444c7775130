use crate::models::item::format_quantity;
use crate::models::{CategoryGroup, ShoppingListItem};
use crate::units::{units_of, MeasurementSystem, OverrideRuleSet};

/// Display a grouped shopping list.
pub fn display_shopping_list(groups: &[CategoryGroup]) {
    if groups.is_empty() {
        println!("Shopping list is empty.");
        return;
    }

    println!();
    println!("=== Shopping List ===");

    let max_name_len = groups
        .iter()
        .flat_map(|g| g.items.iter())
        .map(|i| i.name.len())
        .max()
        .unwrap_or(10);

    let mut total = 0;
    for group in groups {
        println!();
        println!("-- {} --", group.category);
        for item in &group.items {
            println!(
                "  {:<width$}  {:>8} {:<6}  ({})",
                item.name,
                format_quantity(item.quantity),
                item.unit,
                item.recipes.join(", "),
                width = max_name_len
            );
            total += 1;
        }
    }

    println!();
    println!("Total items: {}", total);
    println!();
}

/// Display saved rows grouped by category, with check marks.
pub fn display_saved_list(groups: &[CategoryGroup], rows: &[ShoppingListItem]) {
    if groups.is_empty() {
        println!("Shopping list is empty.");
        return;
    }

    println!();
    println!("=== Shopping List ===");

    for group in groups {
        println!();
        println!("-- {} --", group.category);
        for item in &group.items {
            let checked = rows
                .iter()
                .any(|r| r.checked && r.ingredient_id == item.ingredient_id && r.unit == item.unit);
            let mark = if checked { "x" } else { " " };
            println!(
                "  [{}] {} {} {}",
                mark,
                item.name,
                format_quantity(item.quantity),
                item.unit
            );
        }
    }

    let remaining = rows.iter().filter(|r| !r.checked).count();
    println!();
    println!("{} of {} items left to buy", remaining, rows.len());
    println!();
}

/// Display the unit table, one system at a time.
pub fn display_unit_table() {
    for system in MeasurementSystem::all() {
        println!();
        println!("=== {} (base: {}) ===", system, system.base_unit());
        for unit in units_of(system) {
            println!("  {:<6} = {} {}", unit.symbol, unit.factor_to_base, system.base_unit());
        }
    }

    let rules = OverrideRuleSet::builtin();
    if !rules.is_empty() {
        println!();
        println!("=== Ingredient overrides ({}) ===", rules.len());
        for (name, display_unit) in rules.entries() {
            println!("  {:<10} -> {}", name, display_unit);
        }
    }
    println!();
}
