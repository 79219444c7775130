use serde::{Deserialize, Serialize};

/// A final shopping-list line produced by aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedItem {
    pub ingredient_id: i64,
    pub name: String,
    pub category: Option<String>,
    pub quantity: f64,
    pub unit: String,
    /// Contributing recipe titles, in first-seen order.
    pub recipes: Vec<String>,
}

impl AggregatedItem {
    /// Display string, e.g. "Garlic: 12 clove".
    pub fn display_string(&self) -> String {
        format!("{}: {} {}", self.name, format_quantity(self.quantity), self.unit)
    }
}

/// Items of one category, positioned by `sort_order`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub items: Vec<AggregatedItem>,
    pub sort_order: usize,
}

/// Format a quantity without trailing zeros (2 decimals max).
pub fn format_quantity(quantity: f64) -> String {
    let s = format!("{:.2}", quantity);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

/// Insert into an insertion-ordered set backed by a `Vec`.
pub fn insert_ordered(set: &mut Vec<String>, value: &str) {
    if !set.iter().any(|v| v == value) {
        set.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(12.0), "12");
        assert_eq!(format_quantity(1.5), "1.5");
        assert_eq!(format_quantity(1.666), "1.67");
    }

    #[test]
    fn test_insert_ordered_keeps_first_position() {
        let mut set = Vec::new();
        insert_ordered(&mut set, "Soup");
        insert_ordered(&mut set, "Stew");
        insert_ordered(&mut set, "Soup");
        assert_eq!(set, vec!["Soup".to_string(), "Stew".to_string()]);
    }
}
