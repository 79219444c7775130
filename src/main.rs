use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shopping_list_rs::aggregator::{aggregate, usages_from_meal_plans, usages_from_recipes};
use shopping_list_rs::cli::{Cli, Command, Selection};
use shopping_list_rs::error::{Result, ShopError};
use shopping_list_rs::interface::{
    display_saved_list, display_shopping_list, display_unit_table, prompt_check_items,
    prompt_yes_no, resolve_meal_plan,
};
use shopping_list_rs::models::{AggregatedItem, IngredientUsage, Kitchen, MealPlan, Recipe};
use shopping_list_rs::presenter::group;
use shopping_list_rs::state::{export_csv, load_kitchen, load_list, save_list, ShoppingListManager};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "shopping_list_rs=info"
    } else {
        "shopping_list_rs=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Generate(selection) => cmd_generate(&cli.kitchen, &cli.list, &selection, false),
        Command::Add(selection) => cmd_generate(&cli.kitchen, &cli.list, &selection, true),
        Command::Show => cmd_show(&cli.list),
        Command::Check { clear } => cmd_check(&cli.list, clear),
        Command::Export { csv } => cmd_export(&cli.list, &csv),
        Command::Units => {
            display_unit_table();
            Ok(())
        }
    }
}

/// Collect usages for the selected meal plans and recipes.
fn collect_usages(kitchen: &Kitchen, selection: &Selection) -> Result<Vec<IngredientUsage>> {
    let plans: Vec<&MealPlan> = if selection.all_plans {
        kitchen.meal_plans.iter().collect()
    } else {
        selection
            .plans
            .iter()
            .map(|name| resolve_meal_plan(kitchen, name))
            .collect::<Result<_>>()?
    };

    let recipes: Vec<&Recipe> = selection
        .recipes
        .iter()
        .map(|id| kitchen.recipe(*id).ok_or(ShopError::RecipeNotFound(*id)))
        .collect::<Result<_>>()?;

    if plans.is_empty() && recipes.is_empty() {
        return Err(ShopError::InvalidInput(
            "Select at least one --plan, --all-plans or --recipe".to_string(),
        ));
    }

    let mut usages = usages_from_meal_plans(&plans, &kitchen.recipes)?;
    usages.extend(usages_from_recipes(&recipes));
    Ok(usages)
}

/// Build or extend the shopping list.
fn cmd_generate(
    kitchen_path: &str,
    list_path: &str,
    selection: &Selection,
    merge: bool,
) -> Result<()> {
    let path = Path::new(kitchen_path);
    if !path.exists() {
        eprintln!("Kitchen file not found: {}", kitchen_path);
        eprintln!("Please ensure kitchen.json exists in the current directory.");
        return Ok(());
    }

    let kitchen = load_kitchen(path)?;
    println!(
        "Loaded {} recipes and {} meal plans",
        kitchen.recipes.len(),
        kitchen.meal_plans.len()
    );

    let usages = collect_usages(&kitchen, selection)?;
    let items: Vec<AggregatedItem> = aggregate(&usages)?;
    println!("{} ingredient lines -> {} items", usages.len(), items.len());

    let mut manager = ShoppingListManager::new(load_list(list_path)?);
    if merge {
        let added = manager.merge_items(items)?;
        println!("Added {} new items to the list", added);
    } else {
        if !manager.is_empty() {
            let overwrite = prompt_yes_no("Replace the saved shopping list?", true)?;
            if !overwrite {
                println!("Shopping list unchanged.");
                return Ok(());
            }
        }
        manager.replace(items);
    }

    save_list(list_path, manager.items())?;
    display_shopping_list(&group(&manager.to_aggregated()));
    println!("Saved shopping list to {}", list_path);
    Ok(())
}

/// Show the saved list.
fn cmd_show(list_path: &str) -> Result<()> {
    let rows = load_list(list_path)?;
    let manager = ShoppingListManager::new(rows);
    display_saved_list(&group(&manager.to_aggregated()), manager.items());
    Ok(())
}

/// Tick off bought items and save.
fn cmd_check(list_path: &str, clear: bool) -> Result<()> {
    let mut manager = ShoppingListManager::new(load_list(list_path)?);
    if manager.is_empty() {
        println!("Shopping list is empty.");
        return Ok(());
    }

    let checked = prompt_check_items(manager.items())?;
    for (index, value) in checked.into_iter().enumerate() {
        manager.set_checked(index, value)?;
    }

    if clear {
        let removed = manager.clear_checked();
        println!("Removed {} checked items", removed);
    }

    save_list(list_path, manager.items())?;
    println!("{} items left to buy", manager.remaining());
    Ok(())
}

/// Export the saved list as CSV.
fn cmd_export(list_path: &str, csv_path: &str) -> Result<()> {
    let rows = load_list(list_path)?;
    export_csv(csv_path, &rows)?;
    println!("Exported {} items to {}", rows.len(), csv_path);
    Ok(())
}
