use std::collections::HashSet;

use tracing::debug;

use crate::aggregator::{compare_items, Aggregator};
use crate::error::{Result, ShopError};
use crate::models::{AggregatedItem, ShoppingListItem};

/// Manages the rows of one shopping list.
#[derive(Debug, Clone, Default)]
pub struct ShoppingListManager {
    items: Vec<ShoppingListItem>,
}

impl ShoppingListManager {
    /// Create a manager over existing rows.
    pub fn new(items: Vec<ShoppingListItem>) -> Self {
        Self { items }
    }

    /// Replace the list with freshly aggregated items, all unchecked.
    pub fn replace(&mut self, items: Vec<AggregatedItem>) {
        self.items = items.into_iter().map(ShoppingListItem::from).collect();
    }

    /// Merge aggregated items into the list.
    ///
    /// Existing rows of the affected ingredients are aggregated again together
    /// with the new items, so the list matches a single aggregation over all
    /// recipes. A row stays checked only if the merge left it unchanged. On
    /// error the list is untouched. Returns the growth in row count.
    pub fn merge_items(&mut self, items: Vec<AggregatedItem>) -> Result<usize> {
        if items.is_empty() {
            return Ok(0);
        }
        let before = self.items.len();
        let touched: HashSet<i64> = items.iter().map(|i| i.ingredient_id).collect();

        let mut lines: Vec<AggregatedItem> = self
            .items
            .iter()
            .filter(|row| touched.contains(&row.ingredient_id))
            .map(ShoppingListItem::to_aggregated)
            .collect();
        lines.extend(items);
        let combined = Aggregator::default().combine(&lines)?;

        let merged: Vec<ShoppingListItem> = combined
            .into_iter()
            .map(|item| {
                let unchanged = self.items.iter().any(|row| {
                    row.checked
                        && row.matches(&item)
                        && row.quantity == item.quantity
                        && row.recipes == item.recipes
                });
                let mut row = ShoppingListItem::from(item);
                row.checked = unchanged;
                row
            })
            .collect();

        self.items.retain(|row| !touched.contains(&row.ingredient_id));
        self.items.extend(merged);
        self.items
            .sort_by(|a, b| compare_items(&a.to_aggregated(), &b.to_aggregated()));

        debug!(
            touched = touched.len(),
            rows = self.items.len(),
            "merged items into shopping list"
        );
        Ok(self.items.len().saturating_sub(before))
    }

    /// Mark one row as checked or unchecked.
    pub fn set_checked(&mut self, index: usize, checked: bool) -> Result<()> {
        let len = self.items.len();
        let row = self.items.get_mut(index).ok_or_else(|| {
            ShopError::InvalidInput(format!("No item at index {} (list has {})", index, len))
        })?;
        row.checked = checked;
        Ok(())
    }

    /// Remove checked rows. Returns how many were removed.
    pub fn clear_checked(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|row| !row.checked);
        before - self.items.len()
    }

    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    /// Rows as aggregated items, for grouping.
    pub fn to_aggregated(&self) -> Vec<AggregatedItem> {
        self.items.iter().map(ShoppingListItem::to_aggregated).collect()
    }

    /// Count of unchecked rows.
    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|row| !row.checked).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str, quantity: f64, unit: &str, recipe: &str) -> AggregatedItem {
        AggregatedItem {
            ingredient_id: id,
            name: name.to_string(),
            category: Some("produce".to_string()),
            quantity,
            unit: unit.to_string(),
            recipes: vec![recipe.to_string()],
        }
    }

    #[test]
    fn test_merge_sums_matching_rows() {
        let mut manager = ShoppingListManager::default();
        manager.replace(vec![item(1, "Onion", 2.0, "piece", "Soup")]);
        manager.set_checked(0, true).unwrap();

        let added = manager
            .merge_items(vec![
                item(1, "Onion", 1.5, "piece", "Curry"),
                item(2, "Carrot", 300.0, "g", "Curry"),
            ])
            .unwrap();

        assert_eq!(added, 1);
        assert_eq!(manager.len(), 2);
        let onion = &manager.items()[1];
        assert_eq!(onion.name, "Onion");
        assert!((onion.quantity - 3.5).abs() < 1e-9);
        assert_eq!(onion.recipes, vec!["Curry", "Soup"]);
        assert!(!onion.checked);
    }

    #[test]
    fn test_merge_converts_compatible_units() {
        let mut manager = ShoppingListManager::default();
        manager.replace(vec![item(3, "Milk", 500.0, "ml", "Pancakes")]);
        manager
            .merge_items(vec![item(3, "Milk", 1.0, "cup", "Porridge")])
            .unwrap();

        assert_eq!(manager.len(), 1);
        assert_eq!(manager.items()[0].unit, "ml");
        assert!((manager.items()[0].quantity - 740.0).abs() < 1e-9);
    }

    #[test]
    fn test_merge_keeps_untouched_rows_checked() {
        let mut manager = ShoppingListManager::default();
        manager.replace(vec![
            item(1, "Onion", 2.0, "piece", "Soup"),
            item(2, "Carrot", 1.0, "piece", "Soup"),
        ]);
        manager.set_checked(0, true).unwrap();
        manager.set_checked(1, true).unwrap();

        manager
            .merge_items(vec![item(2, "Carrot", 2.0, "piece", "Stew")])
            .unwrap();

        let onion = manager.items().iter().find(|r| r.name == "Onion").unwrap();
        let carrot = manager.items().iter().find(|r| r.name == "Carrot").unwrap();
        assert!(onion.checked);
        assert!(!carrot.checked);
        assert!((carrot.quantity - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_merge_with_unknown_unit_leaves_list_untouched() {
        let mut manager = ShoppingListManager::default();
        manager.replace(vec![item(1, "Salt", 1.0, "tsp", "Soup")]);
        let before = manager.items().to_vec();

        let result = manager.merge_items(vec![item(1, "Salt", 1.0, "smidgen", "Stew")]);
        assert!(matches!(result, Err(ShopError::UnknownUnit { .. })));
        assert_eq!(manager.items(), before.as_slice());
    }

    #[test]
    fn test_set_checked_out_of_range() {
        let mut manager = ShoppingListManager::default();
        assert!(manager.set_checked(0, true).is_err());
    }

    #[test]
    fn test_clear_checked() {
        let mut manager = ShoppingListManager::default();
        manager.replace(vec![
            item(1, "Onion", 2.0, "piece", "Soup"),
            item(2, "Carrot", 1.0, "piece", "Soup"),
        ]);
        manager.set_checked(1, true).unwrap();
        assert_eq!(manager.remaining(), 1);
        assert_eq!(manager.clear_checked(), 1);
        assert_eq!(manager.items()[0].name, "Onion");
    }
}
