pub mod category;

pub use category::{category_of, group, CategoryPresenter};
