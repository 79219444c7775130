pub mod prompts;
pub mod render;

pub use prompts::{prompt_check_items, prompt_yes_no, resolve_meal_plan};
pub use render::{display_saved_list, display_shopping_list, display_unit_table};
