mod manager;
mod persistence;

pub use manager::ShoppingListManager;
pub use persistence::{export_csv, load_kitchen, load_list, save_list};
