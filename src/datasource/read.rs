//! The `validate_json` read handler.

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;

use crate::logging::structured::LogContext;
use crate::pipeline::context::short_id;
use crate::pipeline::evaluator::evaluate;

use super::attributes::VALIDATE_JSON_SCHEMA;
use super::diagnostics::{Diagnostic, Diagnostics};
use super::model::{ValidateJsonConfig, ValidateJsonState};

/// Provider type name; data source names are prefixed with it.
pub const PROVIDER_TYPE_NAME: &str = "type";

const DATA_SOURCE_SUFFIX: &str = "_validate_json";

/// Resource name attached to read-handler log lines.
const DATA_SOURCE_RESOURCE: &str = "validate_json";

/// Identity the provider reports to its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderMetadata {
    pub type_name: String,
    /// Release version, "dev" for local builds, "test" under acceptance tests.
    pub version: String,
}

impl ProviderMetadata {
    pub fn new(version: &str) -> Self {
        Self {
            type_name: PROVIDER_TYPE_NAME.to_string(),
            version: version.to_string(),
        }
    }

    pub fn data_source_type_name(&self) -> String {
        format!("{}{}", self.type_name, DATA_SOURCE_SUFFIX)
    }
}

/// Response to a read: state on success, diagnostics always.
///
/// `state` is `None` whenever `diagnostics` holds an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadResponse {
    pub state: Option<ValidateJsonState>,
    pub diagnostics: Diagnostics,
}

impl ReadResponse {
    fn failed(diagnostics: Diagnostics) -> Self {
        Self {
            state: None,
            diagnostics,
        }
    }
}

/// Read the data source for one config object.
pub fn read(config: &Value) -> ReadResponse {
    let ctx = LogContext::new(&short_id("read")).with_resource(DATA_SOURCE_RESOURCE);

    let mut diagnostics = VALIDATE_JSON_SCHEMA.check_config(config);
    if diagnostics.has_error() {
        crate::log_warn!(ctx, "DATA_SOURCE_CONFIG_INVALID", errors = diagnostics.len());
        return ReadResponse::failed(diagnostics);
    }

    let config: ValidateJsonConfig = match serde_json::from_value(config.clone()) {
        Ok(c) => c,
        Err(e) => {
            crate::log_warn!(ctx, "DATA_SOURCE_CONFIG_UNREADABLE", error = e.to_string());
            diagnostics.add_error("Invalid Configuration", e.to_string());
            return ReadResponse::failed(diagnostics);
        }
    };

    match evaluate(&config.json_schema, &config.json_object, config.policy()) {
        Ok(result) => ReadResponse {
            state: Some(ValidateJsonState::new(config, &result)),
            diagnostics,
        },
        Err(e) => {
            diagnostics.push(Diagnostic::from(&e));
            ReadResponse::failed(diagnostics)
        }
    }
}

/// Text-in, text-out variant of [`read`] for hosts that exchange JSON.
pub fn read_json(config_text: &str) -> anyhow::Result<String> {
    let config: Value =
        serde_json::from_str(config_text).context("data source config is not valid JSON")?;
    let response = read(&config);
    serde_json::to_string(&response).context("failed to serialize read response")
}
