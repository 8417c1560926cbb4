//! Inference layer: HTTP client for a local LLM service and the grader built on it.

mod client;
mod grader;

pub use client::{InferenceClient, InferenceError};
pub use grader::Grader;
