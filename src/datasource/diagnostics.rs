//! Host-facing diagnostics.
//!
//! Hard evaluation failures are not representable as state values; they
//! travel to the host as error diagnostics that abort the surrounding run.

use serde::Serialize;

use crate::validation::error::EvaluationError;

/// Every diagnostic this data source raises aborts the host run; the
/// severity is still serialised so hosts can route on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl From<&EvaluationError> for Diagnostic {
    fn from(err: &EvaluationError) -> Self {
        Self {
            severity: Severity::Error,
            summary: err.category().as_str().to_string(),
            detail: err.to_string(),
        }
    }
}

/// Ordered list of diagnostics for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, summary: &str, detail: impl Into<String>) {
        self.push(Diagnostic {
            severity: Severity::Error,
            summary: summary.to_string(),
            detail: detail.into(),
        });
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn has_error(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }
}
