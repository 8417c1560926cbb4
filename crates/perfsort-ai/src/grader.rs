//! Grading: prompt → inference → reasoning strip → keyword classification.

use std::time::Duration;

use perfsort_core::{Grade, GradeConfig, ReasoningFilter, build_prompt};
use tracing::{debug, warn};

use crate::client::{InferenceClient, InferenceError};

/// Grades source text against a language model.
pub struct Grader {
    client: InferenceClient,
    prompt_template: String,
    filter: ReasoningFilter,
}

impl Grader {
    pub fn new(client: InferenceClient, prompt_template: String, filter: ReasoningFilter) -> Self {
        Self {
            client,
            prompt_template,
            filter,
        }
    }

    /// Build a grader (and its HTTP client) from a config, validating it first.
    pub fn from_config(config: &GradeConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let client = match config.request_timeout_secs {
            Some(secs) => InferenceClient::with_timeout(
                config.endpoint.clone(),
                config.model.clone(),
                Duration::from_secs(secs),
            )?,
            None => InferenceClient::new(config.endpoint.clone(), config.model.clone()),
        };
        let filter = ReasoningFilter::new(&config.reasoning)?;
        Ok(Self::new(client, config.prompt_template.clone(), filter))
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Grade one file's contents.
    ///
    /// Transport and response errors are returned to the caller; an answer
    /// without any category keyword is not an error and grades as Minimal.
    pub async fn grade(&self, code: &str) -> Result<Grade, InferenceError> {
        let prompt = build_prompt(&self.prompt_template, code);
        let raw = self.client.generate(&prompt).await?;
        let cleaned = self.filter.strip(&raw);
        let grade = Grade::from_response(&cleaned);

        if grade.matched {
            debug!(category = %grade.category, "graded");
        } else {
            warn!(
                response_len = cleaned.len(),
                "no category keyword in model response, defaulting to Minimal"
            );
        }
        Ok(grade)
    }
}
