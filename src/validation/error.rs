//! Evaluation error types.

use thiserror::Error;

use super::compiler::CompileError;
use super::document::DocumentError;
use super::violations::ViolationReport;

/// Label hosts attach to an aborting diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Schema,
    Validation,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Schema => "Schema Error",
            ErrorCategory::Validation => "Validation Error",
        }
    }
}

/// Hard failure of an evaluation.
///
/// The first three kinds mean the request itself is unusable. The last is
/// only produced when the caller asked for violations to abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("Unable to read schema, got error: {0}")]
    SchemaParse(#[source] DocumentError),

    #[error("Unable to read data, got error: {0}")]
    DataParse(#[source] DocumentError),

    #[error("Unable to compile schema, got error: {0}")]
    SchemaCompile(#[source] CompileError),

    #[error("{0}")]
    ValidationPolicy(ViolationReport),
}

impl EvaluationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EvaluationError::SchemaParse(_)
            | EvaluationError::DataParse(_)
            | EvaluationError::SchemaCompile(_) => ErrorCategory::Schema,
            EvaluationError::ValidationPolicy(_) => ErrorCategory::Validation,
        }
    }

    /// Short kind tag for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            EvaluationError::SchemaParse(_) => "schema_parse",
            EvaluationError::DataParse(_) => "data_parse",
            EvaluationError::SchemaCompile(_) => "schema_compile",
            EvaluationError::ValidationPolicy(_) => "validation_policy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::document::DataDocument;
    use crate::validation::violations::Violation;

    #[test]
    fn test_categories() {
        let parse = DataDocument::parse("{").unwrap_err();
        assert_eq!(
            EvaluationError::DataParse(parse.clone()).category().as_str(),
            "Schema Error"
        );
        assert_eq!(EvaluationError::SchemaParse(parse).kind(), "schema_parse");

        let report = ViolationReport::new(
            "schema.json",
            vec![Violation {
                instance_path: String::new(),
                message: "missing property 'a'".to_string(),
            }],
        )
        .unwrap();
        let err = EvaluationError::ValidationPolicy(report);
        assert_eq!(err.category().as_str(), "Validation Error");
        assert!(err.to_string().contains("missing property 'a'"));
    }

    #[test]
    fn test_data_parse_message_prefix() {
        let parse = DataDocument::parse("{\n\tunquoted\n}").unwrap_err();
        let err = EvaluationError::DataParse(parse);
        assert!(err
            .to_string()
            .starts_with("Unable to read data, got error: invalid character 'u'"));
    }
}
