use std::collections::HashMap;

use crate::aggregator::compare_items;
use crate::models::{AggregatedItem, CategoryGroup};
use crate::units::constants::{DEFAULT_CATEGORY_ORDER, OTHER_CATEGORY};

/// Groups items by category in a fixed aisle order.
///
/// Categories missing from the order sort alphabetically after the listed
/// ones. If the order ends with "Other", that bucket stays last.
#[derive(Debug, Clone)]
pub struct CategoryPresenter {
    order: Vec<String>,
}

impl Default for CategoryPresenter {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORY_ORDER.iter().map(|s| s.to_string()).collect())
    }
}

/// Display name of an item's category; absent or blank maps to "Other".
pub fn category_of(item: &AggregatedItem) -> String {
    match item.category.as_deref().map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => OTHER_CATEGORY.to_string(),
    }
}

impl CategoryPresenter {
    pub fn new(order: Vec<String>) -> Self {
        Self { order }
    }

    fn position(&self, category: &str) -> Option<usize> {
        self.order
            .iter()
            .position(|c| c.eq_ignore_ascii_case(category))
    }

    fn other_is_last(&self) -> bool {
        self.order
            .last()
            .is_some_and(|c| c.eq_ignore_ascii_case(OTHER_CATEGORY))
    }

    /// Sort rank: (tier, listed position, lowercase name).
    fn rank(&self, category: &str) -> (u8, usize, String) {
        let lowered = category.to_lowercase();
        match self.position(category) {
            Some(pos) if self.other_is_last() && pos == self.order.len() - 1 => (2, 0, lowered),
            Some(pos) => (0, pos, lowered),
            None => (1, 0, lowered),
        }
    }

    /// Partition items into ordered category groups.
    pub fn group(&self, items: &[AggregatedItem]) -> Vec<CategoryGroup> {
        let mut buckets: HashMap<String, (String, Vec<AggregatedItem>)> = HashMap::new();
        for item in items {
            let category = category_of(item);
            buckets
                .entry(category.to_lowercase())
                .or_insert_with(|| (category.clone(), Vec::new()))
                .1
                .push(item.clone());
        }

        let mut groups: Vec<(String, Vec<AggregatedItem>)> = buckets.into_values().collect();
        groups.sort_by(|a, b| {
            self.rank(&a.0)
                .cmp(&self.rank(&b.0))
                .then_with(|| a.0.cmp(&b.0))
        });

        groups
            .into_iter()
            .enumerate()
            .map(|(sort_order, (category, mut items))| {
                items.sort_by(compare_items);
                CategoryGroup {
                    category,
                    items,
                    sort_order,
                }
            })
            .collect()
    }
}

/// Group with the default aisle order.
pub fn group(items: &[AggregatedItem]) -> Vec<CategoryGroup> {
    CategoryPresenter::default().group(items)
}
