use std::collections::HashMap;
use std::sync::LazyLock;

/// Decimal places kept on displayed quantities.
pub const OUTPUT_DECIMALS: i32 = 2;

/// Minimum Jaro-Winkler similarity for a unit suggestion.
pub const UNIT_SUGGESTION_THRESHOLD: f64 = 0.8;

// ─────────────────────────────────────────────────────────────────────────────
// Base units
// ─────────────────────────────────────────────────────────────────────────────

pub const BASE_WEIGHT_UNIT: &str = "g";
pub const BASE_VOLUME_UNIT: &str = "ml";
pub const BASE_COUNT_UNIT: &str = "piece";

// ─────────────────────────────────────────────────────────────────────────────
// Override constants (kitchen approximations)
// ─────────────────────────────────────────────────────────────────────────────

/// Items per "head" in the generic unit table.
pub const HEAD_FACTOR: f64 = 10.0;

/// Garlic cloves in one head.
pub const GARLIC_CLOVES_PER_HEAD: f64 = 10.0;

/// Minced garlic per clove, in ml (about one teaspoon).
pub const GARLIC_ML_PER_CLOVE: f64 = 5.0;

/// Weight of one peeled garlic clove, in grams.
pub const GARLIC_GRAMS_PER_CLOVE: f64 = 5.0;

/// Loosely packed chopped leaves in one herb bunch (one cup).
pub const HERB_ML_PER_BUNCH: f64 = 240.0;

/// Weight of one herb bunch, in grams.
pub const HERB_GRAMS_PER_BUNCH: f64 = 30.0;

/// Sprigs in one herb bunch.
pub const HERB_SPRIGS_PER_BUNCH: f64 = 20.0;

/// Herbs are only listed in bunches from this many bunches upward.
pub const HERB_MIN_BUNCHES: f64 = 1.0;

// ─────────────────────────────────────────────────────────────────────────────
// Categories
// ─────────────────────────────────────────────────────────────────────────────

/// Bucket for items with no category.
pub const OTHER_CATEGORY: &str = "Other";

/// Aisle order used when presenting a shopping list.
pub const DEFAULT_CATEGORY_ORDER: [&str; 12] = [
    "produce",
    "pulses",
    "dairy",
    "meat",
    "seafood",
    "pantry",
    "grains",
    "oils",
    "nuts",
    "herbs",
    "spices",
    OTHER_CATEGORY,
];

/// Spelled-out and plural unit forms mapped to their canonical symbol.
pub static UNIT_ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("milligram", "mg");
    m.insert("milligrams", "mg");
    m.insert("gram", "g");
    m.insert("grams", "g");
    m.insert("kilogram", "kg");
    m.insert("kilograms", "kg");
    m.insert("ounce", "oz");
    m.insert("ounces", "oz");
    m.insert("pound", "lb");
    m.insert("pounds", "lb");
    m.insert("lbs", "lb");
    m.insert("milliliter", "ml");
    m.insert("milliliters", "ml");
    m.insert("liter", "l");
    m.insert("liters", "l");
    m.insert("teaspoon", "tsp");
    m.insert("teaspoons", "tsp");
    m.insert("tablespoon", "tbsp");
    m.insert("tablespoons", "tbsp");
    m.insert("cups", "cup");
    m.insert("fl oz", "floz");
    m.insert("pinches", "pinch");
    m.insert("pieces", "piece");
    m.insert("pcs", "piece");
    m.insert("cloves", "clove");
    m.insert("slices", "slice");
    m.insert("cans", "can");
    m.insert("sprigs", "sprig");
    m.insert("bunches", "bunch");
    m.insert("heads", "head");
    m
});
