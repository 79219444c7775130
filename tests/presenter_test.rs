use shopping_list_rs::models::AggregatedItem;
use shopping_list_rs::presenter::{group, CategoryPresenter};

fn item(id: i64, name: &str, category: &str) -> AggregatedItem {
    AggregatedItem {
        ingredient_id: id,
        name: name.to_string(),
        category: Some(category.to_string()),
        quantity: 1.0,
        unit: "piece".to_string(),
        recipes: vec!["Dinner".to_string()],
    }
}

fn sample_items() -> Vec<AggregatedItem> {
    vec![
        item(1, "Cheddar", "dairy"),
        item(2, "carrot", "produce"),
        item(3, "Widget", "unknown-cat"),
        item(4, "Mystery", "Other"),
        item(5, "Apple", "produce"),
        item(6, "Gadget", "another-cat"),
    ]
}

#[test]
fn test_categories_follow_aisle_order() {
    let groups = group(&sample_items());
    let categories: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
    assert_eq!(
        categories,
        vec!["produce", "dairy", "another-cat", "unknown-cat", "Other"]
    );

    let orders: Vec<usize> = groups.iter().map(|g| g.sort_order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_items_sorted_case_insensitively_within_category() {
    let groups = group(&sample_items());
    let produce: Vec<&str> = groups[0].items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(produce, vec!["Apple", "carrot"]);
}

#[test]
fn test_grouping_is_idempotent() {
    let presenter = CategoryPresenter::default();
    let items = sample_items();
    assert_eq!(presenter.group(&items), presenter.group(&items));

    let mut reversed = items.clone();
    reversed.reverse();
    assert_eq!(presenter.group(&items), presenter.group(&reversed));
}

#[test]
fn test_empty_input_gives_no_groups() {
    assert!(group(&[]).is_empty());
}
