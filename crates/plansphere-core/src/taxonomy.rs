//! Canonical expense taxonomy and taxonomy correction
//!
//! The generation API is not a trusted component: suggested categories are
//! remapped against this table before acceptance instead of being rejected.
//! Adding a category is one row edit here; the categorizer prompt and the
//! validator both consult the same table.

use tracing::debug;

use crate::models::ExpenseTag;

/// Category -> allowed subcategories, in canonical order.
///
/// The first subcategory of each row is that category's fallback.
pub const CATEGORY_MAP: &[(&str, &[&str])] = &[
    ("Food", &["Restaurants", "Groceries", "Snacks", "Drinks"]),
    ("Transport", &["Flight", "Taxi", "Train", "Bus", "Fuel", "Rental"]),
    ("Accommodation", &["Hotel", "Hostel", "Airbnb", "Resort", "Fees"]),
    ("Activities", &["Tickets", "Tours", "Equipment", "Entertainment"]),
    ("Shopping", &["Clothes", "Souvenirs", "Electronics", "Duty Free"]),
    ("Other", &["General", "Sim Card", "Insurance", "Visa"]),
];

/// Where unknown categories land.
pub const FALLBACK_CATEGORY: &str = "Other";
pub const FALLBACK_SUBCATEGORY: &str = "General";

/// All canonical category names, in order.
pub fn categories() -> Vec<&'static str> {
    CATEGORY_MAP.iter().map(|(category, _)| *category).collect()
}

/// Subcategories allowed under a category, or None for unknown categories.
pub fn subcategories(category: &str) -> Option<&'static [&'static str]> {
    CATEGORY_MAP
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, subs)| *subs)
}

/// Default tag for a freshly created expense form.
pub fn default_tag() -> ExpenseTag {
    ExpenseTag {
        category: "Food".to_string(),
        subcategory: "Restaurants".to_string(),
    }
}

/// Tag used when a degraded categorization call returns nothing usable.
pub fn fallback_tag() -> ExpenseTag {
    ExpenseTag {
        category: FALLBACK_CATEGORY.to_string(),
        subcategory: FALLBACK_SUBCATEGORY.to_string(),
    }
}

/// Remap a suggested category/subcategory pair onto the canonical taxonomy.
///
/// Unknown category -> Other/General. Known category with an unknown
/// subcategory -> the first canonical subcategory of that category.
/// Remaps are logged for quality monitoring, never surfaced to the caller.
pub fn correct(category: &str, subcategory: &str) -> ExpenseTag {
    match subcategories(category) {
        None => {
            debug!(category, subcategory, "unknown category, remapping to fallback");
            fallback_tag()
        }
        Some(subs) if subs.contains(&subcategory) => ExpenseTag {
            category: category.to_string(),
            subcategory: subcategory.to_string(),
        },
        Some(subs) => {
            debug!(
                category,
                subcategory,
                remapped = subs[0],
                "unknown subcategory, remapping to first canonical entry"
            );
            ExpenseTag {
                category: category.to_string(),
                subcategory: subs[0].to_string(),
            }
        }
    }
}

/// Render the taxonomy as prompt lines, e.g. "Food -> Restaurants, Groceries, ...".
pub fn prompt_lines() -> String {
    CATEGORY_MAP
        .iter()
        .map(|(category, subs)| format!("{} -> {}.", category, subs.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}
