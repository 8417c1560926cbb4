//! Performance-risk categories and the folder labels they map to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Performance-risk grade assigned to a source file.
///
/// `FullStop` is the short-circuit sentinel the model emits when a file is
/// negligible. It is kept apart from `Minimal` so the two stay distinguishable
/// in the output tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Severe,
    Important,
    Medium,
    Minimal,
    FullStop,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Self::Severe,
        Self::Important,
        Self::Medium,
        Self::Minimal,
        Self::FullStop,
    ];

    /// Canonical keyword, as matched in model output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Severe => "Severe",
            Self::Important => "Important",
            Self::Medium => "Medium",
            Self::Minimal => "Minimal",
            Self::FullStop => "FULL_STOP",
        }
    }

    /// Whether the model's explanation is kept for this category.
    pub fn is_flagged(&self) -> bool {
        matches!(self, Self::Severe | Self::Important | Self::Medium)
    }

    /// Parse a keyword case-insensitively. Both `FULL_STOP` and `FULLSTOP`
    /// map to [`Category::FullStop`].
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "severe" => Some(Self::Severe),
            "important" => Some(Self::Important),
            "medium" => Some(Self::Medium),
            "minimal" => Some(Self::Minimal),
            "full_stop" | "fullstop" => Some(Self::FullStop),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output folder name per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoryLabels {
    pub severe: String,
    pub important: String,
    pub medium: String,
    pub minimal: String,
    pub full_stop: String,
}

impl Default for CategoryLabels {
    fn default() -> Self {
        Self {
            severe: Category::Severe.as_str().into(),
            important: Category::Important.as_str().into(),
            medium: Category::Medium.as_str().into(),
            minimal: Category::Minimal.as_str().into(),
            full_stop: Category::FullStop.as_str().into(),
        }
    }
}

impl CategoryLabels {
    pub fn label(&self, category: Category) -> &str {
        match category {
            Category::Severe => &self.severe,
            Category::Important => &self.important,
            Category::Medium => &self.medium,
            Category::Minimal => &self.minimal,
            Category::FullStop => &self.full_stop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_parse_case_insensitively() {
        assert_eq!(Category::from_keyword("SEVERE"), Some(Category::Severe));
        assert_eq!(Category::from_keyword("important"), Some(Category::Important));
        assert_eq!(Category::from_keyword("MeDiUm"), Some(Category::Medium));
        assert_eq!(Category::from_keyword("minimal"), Some(Category::Minimal));
        assert_eq!(Category::from_keyword("nope"), None);
    }

    #[test]
    fn both_sentinel_spellings_parse() {
        assert_eq!(Category::from_keyword("FULL_STOP"), Some(Category::FullStop));
        assert_eq!(Category::from_keyword("FULLSTOP"), Some(Category::FullStop));
        assert_eq!(Category::from_keyword("fullstop"), Some(Category::FullStop));
    }

    #[test]
    fn only_top_three_are_flagged() {
        let flagged: Vec<_> = Category::ALL.iter().filter(|c| c.is_flagged()).collect();
        assert_eq!(
            flagged,
            vec![&Category::Severe, &Category::Important, &Category::Medium]
        );
    }

    #[test]
    fn canonical_keywords_round_trip() {
        for cat in Category::ALL {
            assert_eq!(Category::from_keyword(cat.as_str()), Some(cat));
        }
    }

    #[test]
    fn default_labels_are_canonical_keywords() {
        let labels = CategoryLabels::default();
        for cat in Category::ALL {
            assert_eq!(labels.label(cat), cat.as_str());
        }
    }

    #[test]
    fn custom_label_is_used() {
        let labels = CategoryLabels {
            full_stop: "Negligible".into(),
            ..Default::default()
        };
        assert_eq!(labels.label(Category::FullStop), "Negligible");
        assert_eq!(labels.label(Category::Severe), "Severe");
    }
}
