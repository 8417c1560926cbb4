//! Core types for perfsort: categories, configuration, prompts and response parsing.

pub mod category;
pub mod config;
mod error;
pub mod prompt;
pub mod response;

pub use category::{Category, CategoryLabels};
pub use config::{FailurePolicy, GradeConfig};
pub use error::ConfigError;
pub use prompt::build_prompt;
pub use response::{Grade, ReasoningFilter, ReasoningMarkers, extract_category};
