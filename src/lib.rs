//! Validate JSON Core - JSON Schema validation for a declarative
//! configuration host
//!
//! This crate checks whether a JSON document conforms to a JSON Schema and
//! reports a validity flag plus a human-readable violation summary. The
//! evaluation is read-only and stateless: every call parses, compiles and
//! validates from scratch.
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `pipeline` - Evaluation orchestrator and failure policy
//! - `validation` - Parsing, compilation, violations and error taxonomy
//! - `datasource` - Declared attribute schema and the host read handler
//! - `logging` - Structured logging with evaluation context
//!
//! With the `python` feature the evaluator is also exposed as a PyO3
//! extension module.

pub mod datasource;
pub mod logging;
pub mod pipeline;
pub mod validation;

pub use datasource::{read, read_json, ProviderMetadata, ReadResponse};
pub use pipeline::evaluator::{evaluate, EvaluationResult, FailurePolicy};
pub use validation::error::{ErrorCategory, EvaluationError};

/// Initialize the logger.
///
/// Defaults to `Info`; `RUST_LOG` overrides. Safe to call repeatedly.
pub fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}

#[cfg(feature = "python")]
mod python {
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use pyo3::types::PyDict;

    use crate::datasource::VALIDATE_JSON_SCHEMA;
    use crate::pipeline::evaluator::{evaluate, FailurePolicy};

    /// Validate a JSON document against a JSON schema.
    ///
    /// # Returns
    /// Dict with `is_valid` and `validation_errors` (None when valid).
    ///
    /// # Raises
    /// `ValueError` for malformed or uncompilable input, and for
    /// violations when `fail_on_validation_error` is true. The message is
    /// prefixed with "Schema Error" or "Validation Error".
    #[pyfunction]
    #[pyo3(signature = (json_schema, json_object, fail_on_validation_error=false))]
    fn validate_json(
        py: Python<'_>,
        json_schema: &str,
        json_object: &str,
        fail_on_validation_error: bool,
    ) -> PyResult<Py<PyAny>> {
        crate::init_logger();

        let policy = FailurePolicy::from(fail_on_validation_error);
        let result = evaluate(json_schema, json_object, policy)
            .map_err(|e| PyValueError::new_err(format!("{}: {}", e.category().as_str(), e)))?;

        let py_result = PyDict::new(py);
        py_result.set_item("is_valid", result.is_valid())?;
        py_result.set_item("validation_errors", result.validation_errors())?;

        Ok(py_result.into())
    }

    /// Run the data source read handler on a JSON config.
    ///
    /// Returns the JSON-encoded `{state, diagnostics}` response.
    #[pyfunction]
    fn read_data_source(config_json: &str) -> PyResult<String> {
        crate::init_logger();
        crate::datasource::read_json(config_json)
            .map_err(|e| PyValueError::new_err(format!("{:#}", e)))
    }

    /// JSON description of the data source attributes.
    #[pyfunction]
    fn data_source_schema() -> PyResult<String> {
        serde_json::to_string(&*VALIDATE_JSON_SCHEMA)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Python module definition
    #[pymodule]
    fn validate_json_core(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(validate_json, m)?)?;
        m.add_function(wrap_pyfunction!(read_data_source, m)?)?;
        m.add_function(wrap_pyfunction!(data_source_schema, m)?)?;
        Ok(())
    }
}
