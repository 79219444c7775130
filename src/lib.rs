pub mod aggregator;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod presenter;
pub mod state;
pub mod units;

pub use aggregator::{aggregate, Aggregator};
pub use error::{Result, ShopError};
pub use models::{AggregatedItem, CategoryGroup, IngredientUsage};
pub use presenter::{group, CategoryPresenter};
