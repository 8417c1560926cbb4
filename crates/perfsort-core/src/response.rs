//! Model response parsing: reasoning strip and keyword classification.
//!
//! Reasoning models wrap their chain of thought in delimiters (`<think>` ...
//! `</think>` for deepseek-r1). That span is removed before the keyword scan
//! so a category mentioned while reasoning cannot win over the final answer.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::ConfigError;

/// Substituted when the inference reply has no `response` field.
pub const FALLBACK_RESPONSE: &str = "FULL_STOP";

static KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(Severe|Important|Medium|Minimal|FULL_STOP|FULLSTOP)")
        .expect("keyword pattern is valid")
});

/// Delimiters of the reasoning span removed from model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReasoningMarkers {
    pub open: String,
    pub close: String,
}

impl Default for ReasoningMarkers {
    fn default() -> Self {
        Self {
            open: "<think>".into(),
            close: "</think>".into(),
        }
    }
}

/// Compiled reasoning-span remover.
#[derive(Debug, Clone)]
pub struct ReasoningFilter {
    pattern: Regex,
}

impl Default for ReasoningFilter {
    fn default() -> Self {
        Self::new(&ReasoningMarkers::default()).expect("default markers compile")
    }
}

impl ReasoningFilter {
    /// Build a filter matching `open`, then anything (newlines included,
    /// non-greedy), then `close`. Markers are matched literally.
    ///
    /// Both markers must be non-empty; an empty pair would match the empty
    /// string and [`ReasoningFilter::strip`] could never reach a fixpoint.
    pub fn new(markers: &ReasoningMarkers) -> Result<Self, ConfigError> {
        if markers.open.is_empty() || markers.close.is_empty() {
            return Err(ConfigError::Invalid(
                "reasoning markers must be non-empty".into(),
            ));
        }
        let pattern = Regex::new(&format!(
            "(?s){}.*?{}",
            regex::escape(&markers.open),
            regex::escape(&markers.close)
        ))
        .map_err(|e| ConfigError::Invalid(format!("reasoning markers: {e}")))?;
        Ok(Self { pattern })
    }

    /// Remove every reasoning span and trim the remainder.
    ///
    /// Repeats until no span is left, so the result is a fixpoint and
    /// stripping it again returns it unchanged.
    pub fn strip(&self, text: &str) -> String {
        let mut current = text.trim().to_string();
        while self.pattern.is_match(&current) {
            current = self.pattern.replace_all(&current, "").trim().to_string();
        }
        current
    }
}

/// First category keyword in `cleaned`, if any.
pub fn extract_category(cleaned: &str) -> Option<Category> {
    KEYWORD_RE
        .find(cleaned)
        .and_then(|m| Category::from_keyword(m.as_str()))
}

/// Classification of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub category: Category,
    /// Cleaned model response, kept only for flagged categories.
    pub explanation: Option<String>,
    /// False when no keyword was found and the category defaulted to
    /// [`Category::Minimal`].
    pub matched: bool,
}

impl Grade {
    /// Classify an already-cleaned model response.
    pub fn from_response(cleaned: &str) -> Self {
        let found = extract_category(cleaned);
        let category = found.unwrap_or(Category::Minimal);
        let explanation = category.is_flagged().then(|| cleaned.to_string());
        Self {
            category,
            explanation,
            matched: found.is_some(),
        }
    }
}
