//! Schema-compile-and-validate evaluation.
//!
//! One evaluation walks a fixed sequence:
//! 1. Parse schema text (hard failure on malformed JSON)
//! 2. Parse data text (hard failure on malformed JSON)
//! 3. Compile the schema under `schema.json` (hard failure on rejection)
//! 4. Validate the data, collecting every violation
//! 5. Classify the outcome against the caller's failure policy
//!
//! Nothing is cached or shared between evaluations, so concurrent calls
//! need no coordination.

use crate::validation::compiler::compile;
use crate::validation::document::{DataDocument, SchemaDocument};
use crate::validation::error::EvaluationError;
use crate::validation::violations::{ValidationOutcome, ViolationReport};

use super::context::EvaluationContext;

/// What to do when the data violates the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Return an invalid result carrying the violations.
    #[default]
    Report,
    /// Abort with [`EvaluationError::ValidationPolicy`].
    Abort,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Report => "report",
            FailurePolicy::Abort => "abort",
        }
    }
}

impl From<bool> for FailurePolicy {
    fn from(fail_on_violation: bool) -> Self {
        if fail_on_violation {
            FailurePolicy::Abort
        } else {
            FailurePolicy::Report
        }
    }
}

/// Successful evaluation response.
///
/// `validation_errors` is present exactly when `is_valid` is false; the
/// constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationResult {
    is_valid: bool,
    validation_errors: Option<String>,
}

impl EvaluationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            validation_errors: None,
        }
    }

    pub fn invalid(report: &ViolationReport) -> Self {
        Self {
            is_valid: false,
            validation_errors: Some(report.to_string()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn validation_errors(&self) -> Option<&str> {
        self.validation_errors.as_deref()
    }
}

/// Evaluate `data_text` against `schema_text`.
///
/// Parse and compile failures are always returned as errors. Violations
/// are returned as an invalid result under [`FailurePolicy::Report`] and
/// as [`EvaluationError::ValidationPolicy`] under [`FailurePolicy::Abort`].
pub fn evaluate(
    schema_text: &str,
    data_text: &str,
    policy: FailurePolicy,
) -> Result<EvaluationResult, EvaluationError> {
    let eval_ctx = EvaluationContext::new(schema_text, data_text, policy);
    let ctx = eval_ctx.log_context();

    crate::log_debug!(
        ctx,
        "EVALUATION_START",
        policy = policy.as_str(),
        schema = &eval_ctx.schema_digest,
        data = &eval_ctx.data_digest,
    );

    let result = run(schema_text, data_text, &eval_ctx);

    match &result {
        Ok(r) => {
            crate::log_info!(ctx, "EVALUATION_COMPLETE", valid = r.is_valid());
        }
        Err(e) => {
            crate::log_warn!(
                ctx,
                "EVALUATION_FAILED",
                kind = e.kind(),
                category = e.category().as_str(),
            );
        }
    }

    result
}

fn run(
    schema_text: &str,
    data_text: &str,
    eval_ctx: &EvaluationContext,
) -> Result<EvaluationResult, EvaluationError> {
    let ctx = eval_ctx.log_context();

    // [1] PARSE SCHEMA
    let schema = SchemaDocument::parse(schema_text).map_err(EvaluationError::SchemaParse)?;

    // [2] PARSE DATA
    let data = DataDocument::parse(data_text).map_err(EvaluationError::DataParse)?;

    // [3] COMPILE
    let compiled = compile(schema, &ctx).map_err(EvaluationError::SchemaCompile)?;
    let ctx = ctx.with_resource(compiled.resource());

    // [4] VALIDATE
    let outcome = compiled.validate(&data, &ctx);

    // [5] CLASSIFY
    match outcome {
        ValidationOutcome::Valid => Ok(EvaluationResult::valid()),
        ValidationOutcome::Invalid(report) => {
            crate::log_info!(
                ctx,
                "VALIDATION_VIOLATIONS",
                count = report.len(),
                policy = eval_ctx.policy.as_str(),
            );
            match eval_ctx.policy {
                FailurePolicy::Report => Ok(EvaluationResult::invalid(&report)),
                FailurePolicy::Abort => Err(EvaluationError::ValidationPolicy(report)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::error::ErrorCategory;

    const MOVIE_SCHEMA: &str = r#"{
  "$id": "https://example.com/movie.schema.json",
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "description": "A representation of a movie",
  "type": "object",
  "required": ["title", "director"],
  "properties": {
    "title": {"type": "string"},
    "director": {"type": "string"}
  }
}"#;

    const MOVIE: &str = r#"{"title": "Sample Movie", "director": "John Director"}"#;

    #[test]
    fn test_valid_document() {
        let result = evaluate(MOVIE_SCHEMA, MOVIE, FailurePolicy::Report).unwrap();
        assert!(result.is_valid());
        assert_eq!(result.validation_errors(), None);
    }

    #[test]
    fn test_missing_properties_reported() {
        let result = evaluate(MOVIE_SCHEMA, "{}", FailurePolicy::Report).unwrap();
        assert!(!result.is_valid());
        assert!(result
            .validation_errors()
            .unwrap()
            .contains("missing properties 'title', 'director'"));
    }

    #[test]
    fn test_missing_properties_abort() {
        let err = evaluate(MOVIE_SCHEMA, "{}", FailurePolicy::Abort).unwrap_err();
        assert!(matches!(err, EvaluationError::ValidationPolicy(_)));
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err
            .to_string()
            .contains("missing properties 'title', 'director'"));
    }

    #[test]
    fn test_valid_document_under_abort_policy() {
        let result = evaluate(MOVIE_SCHEMA, MOVIE, FailurePolicy::Abort).unwrap();
        assert!(result.is_valid());
    }

    #[test]
    fn test_compile_rejection_ignores_policy() {
        let schema = MOVIE_SCHEMA.replacen(r#"{"type": "string"}"#, r#"{"type": "notarealtype"}"#, 1);
        for policy in [FailurePolicy::Report, FailurePolicy::Abort] {
            let err = evaluate(&schema, MOVIE, policy).unwrap_err();
            assert!(matches!(err, EvaluationError::SchemaCompile(_)));
            assert_eq!(err.category(), ErrorCategory::Schema);
            assert!(err.to_string().contains(
                "value must be one of 'array', 'boolean', 'integer', 'null', 'number', 'object', 'string'"
            ));
        }
    }

    #[test]
    fn test_data_parse_rejection_ignores_policy() {
        let data = "{\n\t\"title\": \"Sample Movie\",\n\t\"director\": \"John Director\",\n\tunquoted string\n}";
        for policy in [FailurePolicy::Report, FailurePolicy::Abort] {
            let err = evaluate(MOVIE_SCHEMA, data, policy).unwrap_err();
            assert!(matches!(err, EvaluationError::DataParse(_)));
            assert!(err
                .to_string()
                .contains("Unable to read data, got error: invalid character 'u'"));
        }
    }

    #[test]
    fn test_schema_parse_checked_before_data() {
        let err = evaluate("{", "{", FailurePolicy::Report).unwrap_err();
        assert!(matches!(err, EvaluationError::SchemaParse(_)));
    }

    #[test]
    fn test_data_parse_checked_before_compile() {
        let err = evaluate(r#"{"type": "bogus"}"#, "nope", FailurePolicy::Report).unwrap_err();
        assert!(matches!(err, EvaluationError::DataParse(_)));
    }

    #[test]
    fn test_policy_from_bool() {
        assert_eq!(FailurePolicy::from(true), FailurePolicy::Abort);
        assert_eq!(FailurePolicy::from(false), FailurePolicy::Report);
        assert_eq!(FailurePolicy::default(), FailurePolicy::Report);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::Value;

    /// Small JSON values that exercise required, type and bound checks.
    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            "[a-z ]{0,12}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("(title|director|year|[a-z]{1,6})", inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    const SCHEMA: &str = r#"{
        "type": "object",
        "required": ["title", "director"],
        "properties": {
            "title": {"type": "string", "maxLength": 8},
            "director": {"type": "string"},
            "year": {"type": "integer", "minimum": 1900}
        }
    }"#;

    proptest! {
        /// `validation_errors` is set exactly when the data is invalid.
        #[test]
        fn errors_present_iff_invalid(value in json_value()) {
            let result = evaluate(SCHEMA, &value.to_string(), FailurePolicy::Report).unwrap();
            prop_assert_eq!(result.is_valid(), result.validation_errors().is_none());
        }

        /// Identical inputs always produce identical results.
        #[test]
        fn evaluation_is_deterministic(value in json_value()) {
            let data = value.to_string();
            let a = evaluate(SCHEMA, &data, FailurePolicy::Report).unwrap();
            let b = evaluate(SCHEMA, &data, FailurePolicy::Report).unwrap();
            prop_assert_eq!(a, b);
        }

        /// The abort policy fails exactly where the report policy says invalid,
        /// with the same text.
        #[test]
        fn abort_policy_matches_report_policy(value in json_value()) {
            let data = value.to_string();
            let reported = evaluate(SCHEMA, &data, FailurePolicy::Report).unwrap();
            match evaluate(SCHEMA, &data, FailurePolicy::Abort) {
                Ok(r) => prop_assert!(r.is_valid() && reported.is_valid()),
                Err(e) => {
                    let message = e.to_string();
                    prop_assert_eq!(Some(message.as_str()), reported.validation_errors());
                }
            }
        }
    }
}
