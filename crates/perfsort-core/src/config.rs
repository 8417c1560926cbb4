//! Run configuration.
//!
//! Every knob has a default, so an empty TOML file (or none at all) yields a
//! working setup against a local Ollama on its standard port.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::category::{Category, CategoryLabels};
use crate::error::ConfigError;
use crate::prompt::{CODE_PLACEHOLDER, DEFAULT_PROMPT_TEMPLATE};
use crate::response::ReasoningMarkers;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_MODEL: &str = "deepseek-r1:14b";

/// What to do when a single file fails to read, grade, or place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log the failure, count it, and move on to the next file.
    #[default]
    Skip,
    /// Stop the run and return the error.
    Abort,
}

/// Complete configuration for a grading run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GradeConfig {
    /// Full URL of the generate endpoint.
    pub endpoint: String,
    pub model: String,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Case-sensitive file name suffix, e.g. `.cs`.
    pub suffix: String,
    pub labels: CategoryLabels,
    /// Must contain `{code}`.
    pub prompt_template: String,
    pub reasoning: ReasoningMarkers,
    /// Files graded at once. 1 keeps the run strictly sequential.
    pub concurrency: usize,
    pub on_error: FailurePolicy,
    /// HTTP timeout per request; unset leaves the client default.
    pub request_timeout_secs: Option<u64>,
}

impl Default for GradeConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            model: DEFAULT_MODEL.into(),
            input_dir: PathBuf::from("Code"),
            output_dir: PathBuf::from("Graded"),
            suffix: ".cs".into(),
            labels: CategoryLabels::default(),
            prompt_template: DEFAULT_PROMPT_TEMPLATE.into(),
            reasoning: ReasoningMarkers::default(),
            concurrency: 1,
            on_error: FailurePolicy::default(),
            request_timeout_secs: None,
        }
    }
}

impl GradeConfig {
    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Reject settings that would make the run meaningless or ambiguous.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint is empty".into()));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model is empty".into()));
        }
        if self.suffix.is_empty() {
            return Err(ConfigError::Invalid("suffix is empty".into()));
        }
        if !self.prompt_template.contains(CODE_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "prompt_template has no {CODE_PLACEHOLDER} placeholder"
            )));
        }
        if self.reasoning.open.is_empty() || self.reasoning.close.is_empty() {
            return Err(ConfigError::Invalid("reasoning markers must be non-empty".into()));
        }
        if self.concurrency == 0 {
            return Err(ConfigError::Invalid("concurrency must be at least 1".into()));
        }

        let mut seen = HashSet::new();
        for cat in Category::ALL {
            let label = self.labels.label(cat);
            if label.trim().is_empty() || label.contains(['/', '\\']) {
                return Err(ConfigError::Invalid(format!(
                    "label for {cat} must be a plain folder name, got {label:?}"
                )));
            }
            if !seen.insert(label) {
                return Err(ConfigError::Invalid(format!("duplicate label {label:?}")));
            }
        }
        Ok(())
    }
}
