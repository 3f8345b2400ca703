//! Category taxonomy
//!
//! Maps the display labels used by the live feed onto the closed [`Category`]
//! set. Resolution is exact and case-sensitive.

use crate::error::{Result, StrataError};
use crate::types::{Category, CATEGORY_COUNT};

/// Display label to category, in stacking order.
pub const CATEGORY_TABLE: [(&str, Category); CATEGORY_COUNT] = [
    ("Android Webview", Category::Android),
    ("BlackBerry", Category::BlackBerry),
    ("Chrome", Category::Chrome),
    ("Edge", Category::Edge),
    ("Firefox", Category::Firefox),
    ("Internet Explorer", Category::InternetExplorer),
    ("Opera", Category::Opera),
    ("Safari", Category::Safari),
];

/// Resolve an external label into its category.
pub fn resolve(label: &str) -> Result<Category> {
    CATEGORY_TABLE
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, category)| *category)
        .ok_or_else(|| StrataError::UnknownCategoryLabel(label.to_string()))
}

/// Display label for a category.
pub fn label(category: Category) -> &'static str {
    CATEGORY_TABLE[category.index()].0
}

/// All recognized labels in stacking order.
pub fn labels() -> impl Iterator<Item = &'static str> {
    CATEGORY_TABLE.iter().map(|(label, _)| *label)
}
