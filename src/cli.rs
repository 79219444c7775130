use clap::{Args, Parser, Subcommand};

/// Shopping list builder: sums recipe ingredients across meal plans into one list.
#[derive(Parser, Debug)]
#[command(name = "shopping_list")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the kitchen JSON file (recipes and meal plans).
    #[arg(short, long, default_value = "kitchen.json")]
    pub kitchen: String,

    /// Path to the shopping list JSON file.
    #[arg(short, long, default_value = "shopping_list.json")]
    pub list: String,

    /// Log aggregation details to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Which recipes feed the shopping list.
#[derive(Args, Debug, Clone, Default)]
pub struct Selection {
    /// Meal plan name (repeatable, fuzzy matched).
    #[arg(short, long = "plan")]
    pub plans: Vec<String>,

    /// Use every meal plan in the kitchen file.
    #[arg(long, conflicts_with = "plans")]
    pub all_plans: bool,

    /// Recipe id to shop for at its own serving count (repeatable).
    #[arg(short, long = "recipe")]
    pub recipes: Vec<i64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a new shopping list, replacing the saved one.
    Generate(Selection),

    /// Add ingredients to the saved shopping list.
    Add(Selection),

    /// Show the saved shopping list.
    Show,

    /// Tick off bought items.
    Check {
        /// Remove checked items afterwards.
        #[arg(long)]
        clear: bool,
    },

    /// Export the saved shopping list as CSV.
    Export {
        /// Output CSV path.
        #[arg(long, default_value = "shopping_list.csv")]
        csv: String,
    },

    /// List the recognized units.
    Units,
}

impl Default for Command {
    fn default() -> Self {
        Command::Show
    }
}
