//! Violation collection and rendering.
//!
//! The validator yields one error per failed keyword. Consecutive
//! `required` failures at the same location are folded into a single
//! "missing properties" line so the report reads the way schema authors
//! expect.

use std::fmt;

use jsonschema::error::ValidationErrorKind;
use jsonschema::ValidationError;
use serde_json::Value;

use super::compiler::resource_label;

/// A single point of non-conformance between data and schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating value in the data document.
    pub instance_path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at '{}': {}", self.instance_path, self.message)
    }
}

/// Ordered, non-empty list of violations for one compiled resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationReport {
    resource: String,
    violations: Vec<Violation>,
}

impl ViolationReport {
    /// Returns `None` when there is nothing to report.
    pub fn new(resource: &str, violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            return None;
        }
        Some(Self {
            resource: resource.to_string(),
            violations,
        })
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }
}

impl fmt::Display for ViolationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "jsonschema validation failed with {}",
            resource_label(&self.resource)
        )?;
        for v in &self.violations {
            write!(f, "\n- {v}")?;
        }
        Ok(())
    }
}

/// Result of applying a compiled schema to a data document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(ViolationReport),
}

impl ValidationOutcome {
    pub fn from_violations(resource: &str, violations: Vec<Violation>) -> Self {
        match ViolationReport::new(resource, violations) {
            Some(report) => ValidationOutcome::Invalid(report),
            None => ValidationOutcome::Valid,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

/// Render validator errors into violations, preserving validator order.
pub fn collect_violations<'a, I>(errors: I) -> Vec<Violation>
where
    I: IntoIterator<Item = ValidationError<'a>>,
{
    let mut violations = Vec::new();
    // (instance_path, missing property names)
    let mut missing: Option<(String, Vec<String>)> = None;

    for error in errors {
        let instance_path = error.instance_path.to_string();

        if let ValidationErrorKind::Required { property } = &error.kind {
            let name = property_name(property);
            match missing.as_mut() {
                Some((path, names)) if *path == instance_path => names.push(name),
                _ => {
                    flush_missing(&mut missing, &mut violations);
                    missing = Some((instance_path, vec![name]));
                }
            }
            continue;
        }

        flush_missing(&mut missing, &mut violations);

        let message = match &error.kind {
            ValidationErrorKind::AdditionalProperties { unexpected } => {
                let noun = if unexpected.len() == 1 {
                    "additional property"
                } else {
                    "additional properties"
                };
                format!("{} {} not allowed", noun, quoted_list(unexpected))
            }
            _ => error.to_string(),
        };

        violations.push(Violation {
            instance_path,
            message,
        });
    }

    flush_missing(&mut missing, &mut violations);
    violations
}

fn flush_missing(missing: &mut Option<(String, Vec<String>)>, violations: &mut Vec<Violation>) {
    if let Some((instance_path, names)) = missing.take() {
        let noun = if names.len() == 1 {
            "missing property"
        } else {
            "missing properties"
        };
        violations.push(Violation {
            instance_path,
            message: format!("{} {}", noun, quoted_list(&names)),
        });
    }
}

fn property_name(property: &Value) -> String {
    match property {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `'a', 'b', 'c'`
pub(crate) fn quoted_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|s| format!("'{}'", s.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}
