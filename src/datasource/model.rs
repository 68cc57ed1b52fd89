//! Request and state models for the data source.

use serde::{Deserialize, Serialize};

use crate::pipeline::evaluator::{EvaluationResult, FailurePolicy};

/// Configuration supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidateJsonConfig {
    pub json_schema: String,
    pub json_object: String,
    #[serde(default)]
    pub fail_on_validation_error: Option<bool>,
}

impl ValidateJsonConfig {
    pub fn policy(&self) -> FailurePolicy {
        FailurePolicy::from(self.fail_on_validation_error.unwrap_or(false))
    }
}

/// State returned to the host: the inputs echoed back plus the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateJsonState {
    pub json_schema: String,
    pub json_object: String,
    pub is_valid: bool,
    pub validation_errors: Option<String>,
    pub fail_on_validation_error: Option<bool>,
}

impl ValidateJsonState {
    pub fn new(config: ValidateJsonConfig, result: &EvaluationResult) -> Self {
        Self {
            json_schema: config.json_schema,
            json_object: config.json_object,
            is_valid: result.is_valid(),
            validation_errors: result.validation_errors().map(str::to_string),
            fail_on_validation_error: config.fail_on_validation_error,
        }
    }
}
