use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of known categories.
pub const CATEGORY_COUNT: usize = 8;

/// Closed set of client categories an event can be tagged with.
///
/// The declaration order is the fixed stacking order used by the projector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Android,
    BlackBerry,
    Chrome,
    Edge,
    Firefox,
    #[serde(rename = "ie")]
    InternetExplorer,
    Opera,
    Safari,
}

impl Category {
    /// All categories in stacking order.
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Android,
        Category::BlackBerry,
        Category::Chrome,
        Category::Edge,
        Category::Firefox,
        Category::InternetExplorer,
        Category::Opera,
        Category::Safari,
    ];

    /// Position in stacking order, also the slot in a count snapshot.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical identifier.
    pub fn id(self) -> &'static str {
        match self {
            Category::Android => "android",
            Category::BlackBerry => "blackberry",
            Category::Chrome => "chrome",
            Category::Edge => "edge",
            Category::Firefox => "firefox",
            Category::InternetExplorer => "ie",
            Category::Opera => "opera",
            Category::Safari => "safari",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
