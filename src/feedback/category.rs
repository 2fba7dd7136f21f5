//! The closed set of feedback categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A feedback category.
///
/// The set is closed: anything outside these six values is rejected when
/// parsed, so a draft can never carry an arbitrary category string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Report a technical issue or error.
    Bug,
    /// Suggest a new feature or improvement.
    Feature,
    /// Comments on design and user experience.
    Ui,
    /// Issues with speed or responsiveness.
    Performance,
    /// Feedback on video content or accuracy.
    Content,
    /// Other comments or suggestions.
    General,
}

/// Error returned when a category value is not part of the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown feedback category: {0} (expected one of bug, feature, ui, performance, content, general)")]
pub struct CategoryParseError(pub String);

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 6] = [
        Category::Bug,
        Category::Feature,
        Category::Ui,
        Category::Performance,
        Category::Content,
        Category::General,
    ];

    /// Wire value, e.g. `"bug"`.
    pub fn value(self) -> &'static str {
        match self {
            Category::Bug => "bug",
            Category::Feature => "feature",
            Category::Ui => "ui",
            Category::Performance => "performance",
            Category::Content => "content",
            Category::General => "general",
        }
    }

    /// Human-readable label shown on the category button.
    pub fn label(self) -> &'static str {
        match self {
            Category::Bug => "Bug Report",
            Category::Feature => "Feature Request",
            Category::Ui => "UI/UX Feedback",
            Category::Performance => "Performance",
            Category::Content => "Content Quality",
            Category::General => "General Feedback",
        }
    }

    /// One-line description shown under the label.
    pub fn description(self) -> &'static str {
        match self {
            Category::Bug => "Report a technical issue or error",
            Category::Feature => "Suggest a new feature or improvement",
            Category::Ui => "Comments on design and user experience",
            Category::Performance => "Issues with speed or responsiveness",
            Category::Content => "Feedback on video content or accuracy",
            Category::General => "Other comments or suggestions",
        }
    }

    /// Position of this category in [`Category::ALL`].
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or_default()
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.value() == s)
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.value())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_known_value() {
        for category in Category::ALL {
            assert_eq!(category.value().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_value() {
        let err = "praise".parse::<Category>().unwrap_err();
        assert_eq!(err, CategoryParseError("praise".into()));
        assert!(err.to_string().contains("praise"));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Bug".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_labels_match_values() {
        assert_eq!(Category::Bug.label(), "Bug Report");
        assert_eq!(Category::Ui.label(), "UI/UX Feedback");
        assert_eq!(Category::General.label(), "General Feedback");
    }

    #[test]
    fn test_index_follows_display_order() {
        assert_eq!(Category::Bug.index(), 0);
        assert_eq!(Category::General.index(), 5);
    }

    #[test]
    fn test_serde_uses_value_string() {
        let json = serde_json::to_string(&Category::Performance).unwrap();
        assert_eq!(json, "\"performance\"");
        let back: Category = serde_json::from_str("\"content\"").unwrap();
        assert_eq!(back, Category::Content);
        assert!(serde_json::from_str::<Category>("\"other\"").is_err());
    }
}
