//! Schema compilation.
//!
//! A parsed schema is registered under a fixed synthetic resource id, so
//! references through that id resolve, and compiled into a validator.
//! Compilation runs a structural check of every `type` keyword first,
//! then hands the document to `jsonschema`, which validates it against
//! its meta-schema. Remote `$ref` retrieval is not
//! compiled in, so compilation never touches the network or disk.

use jsonschema::error::ValidationErrorKind;
use jsonschema::{Resource, Validator};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::logging::structured::LogContext;

use super::document::{DataDocument, SchemaDocument};
use super::violations::{collect_violations, quoted_list, ValidationOutcome};

/// Resource id every schema is registered under.
pub const SCHEMA_RESOURCE_ID: &str = "schema.json";

/// Base URI `jsonschema` assigns to a root schema without `$id`. Relative
/// references such as `schema.json#/$defs/a` resolve against it.
const DEFAULT_BASE_URI: &str = "json-schema:///";

/// How a resource id is quoted in compile errors and violation reports.
pub fn resource_label(resource: &str) -> String {
    format!("'{resource}#'")
}

/// Primitive type names accepted by the `type` keyword.
pub const PRIMITIVE_TYPES: [&str; 7] = [
    "array", "boolean", "integer", "null", "number", "object", "string",
];

/// Keywords whose value is a single subschema.
const SUBSCHEMA_KEYWORDS: &[&str] = &[
    "additionalItems",
    "additionalProperties",
    "contains",
    "contentSchema",
    "else",
    "if",
    "items",
    "not",
    "propertyNames",
    "then",
    "unevaluatedItems",
    "unevaluatedProperties",
];

/// Keywords whose value is an array of subschemas.
const SUBSCHEMA_ARRAY_KEYWORDS: &[&str] = &["allOf", "anyOf", "items", "oneOf", "prefixItems"];

/// Keywords whose value maps names to subschemas.
const SUBSCHEMA_MAP_KEYWORDS: &[&str] = &[
    "$defs",
    "definitions",
    "dependencies",
    "dependentSchemas",
    "patternProperties",
    "properties",
];

/// Schema compilation failure. Always fatal to the evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(
        "{} is not a valid schema: at '{pointer}': value must be one of {}",
        resource_label(resource),
        quoted_list(&PRIMITIVE_TYPES)
    )]
    UnknownType { resource: String, pointer: String },

    /// The schema failed meta-schema validation.
    #[error("{} is not a valid schema: at '{pointer}': {message}", resource_label(resource))]
    Rejected {
        resource: String,
        pointer: String,
        message: String,
    },

    /// A reference or `$schema` dialect could not be resolved.
    #[error("{} could not be compiled: {message}", resource_label(resource))]
    Unresolvable { resource: String, message: String },
}

/// Executable form of a schema, bound to its resource id.
///
/// Consumed by [`CompiledSchema::validate`]; a compiled schema is applied
/// to exactly one data document.
pub struct CompiledSchema {
    resource: String,
    validator: Validator,
}

impl std::fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}

impl CompiledSchema {
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Apply the schema to `data`, collecting every violation.
    pub fn validate(self, data: &DataDocument, ctx: &LogContext) -> ValidationOutcome {
        let violations = collect_violations(self.validator.iter_errors(data.as_value()));

        crate::log_debug!(ctx, "VALIDATION_RUN", violations = violations.len());

        ValidationOutcome::from_violations(&self.resource, violations)
    }
}

/// Compile a parsed schema under [`SCHEMA_RESOURCE_ID`].
pub fn compile(schema: SchemaDocument, ctx: &LogContext) -> Result<CompiledSchema, CompileError> {
    let value = schema.into_value();

    if let Some(pointer) = find_unknown_type(&value, "") {
        crate::log_warn!(ctx, "SCHEMA_TYPE_UNKNOWN", pointer = &pointer);
        return Err(CompileError::UnknownType {
            resource: SCHEMA_RESOURCE_ID.to_string(),
            pointer,
        });
    }

    let unresolvable = |message: String| CompileError::Unresolvable {
        resource: SCHEMA_RESOURCE_ID.to_string(),
        message,
    };

    let resource = Resource::from_contents(value.clone()).map_err(|e| {
        crate::log_warn!(ctx, "SCHEMA_DIALECT_UNKNOWN", error = e.to_string());
        unresolvable(e.to_string())
    })?;

    let validator = jsonschema::options()
        .with_resource(format!("{DEFAULT_BASE_URI}{SCHEMA_RESOURCE_ID}"), resource)
        .build(&value)
        .map_err(|e| {
            crate::log_warn!(ctx, "SCHEMA_REJECTED", error = e.to_string());
            match &e.kind {
                ValidationErrorKind::Referencing(_) => unresolvable(e.to_string()),
                _ => CompileError::Rejected {
                    resource: SCHEMA_RESOURCE_ID.to_string(),
                    pointer: e.instance_path.to_string(),
                    message: e.to_string(),
                },
            }
        })?;

    crate::log_debug!(ctx, "SCHEMA_COMPILED");

    Ok(CompiledSchema {
        resource: SCHEMA_RESOURCE_ID.to_string(),
        validator,
    })
}

/// Find the first `type` keyword naming something other than a primitive
/// type. Returns its JSON Pointer within the schema document.
fn find_unknown_type(schema: &Value, pointer: &str) -> Option<String> {
    let Value::Object(obj) = schema else {
        return None;
    };

    for (keyword, value) in obj {
        let here = format!("{}/{}", pointer, escape_pointer_token(keyword));

        if keyword == "type" {
            if let Some(found) = check_type_keyword(value, &here) {
                return Some(found);
            }
            continue;
        }

        if SUBSCHEMA_KEYWORDS.contains(&keyword.as_str()) && value.is_object() {
            if let Some(found) = find_unknown_type(value, &here) {
                return Some(found);
            }
        }

        if SUBSCHEMA_ARRAY_KEYWORDS.contains(&keyword.as_str()) {
            if let Value::Array(items) = value {
                for (i, item) in items.iter().enumerate() {
                    if let Some(found) = find_unknown_type(item, &format!("{here}/{i}")) {
                        return Some(found);
                    }
                }
            }
        }

        if SUBSCHEMA_MAP_KEYWORDS.contains(&keyword.as_str()) {
            if let Value::Object(members) = value {
                if let Some(found) = find_in_members(members, &here) {
                    return Some(found);
                }
            }
        }
    }

    None
}

fn find_in_members(members: &Map<String, Value>, pointer: &str) -> Option<String> {
    members.iter().find_map(|(name, member)| {
        find_unknown_type(member, &format!("{}/{}", pointer, escape_pointer_token(name)))
    })
}

/// `type` is either a primitive name or an array of them. Other shapes are
/// left to meta-schema validation.
fn check_type_keyword(value: &Value, pointer: &str) -> Option<String> {
    match value {
        Value::String(name) if !PRIMITIVE_TYPES.contains(&name.as_str()) => {
            Some(pointer.to_string())
        }
        Value::Array(names) => names.iter().enumerate().find_map(|(i, name)| match name {
            Value::String(s) if !PRIMITIVE_TYPES.contains(&s.as_str()) => {
                Some(format!("{pointer}/{i}"))
            }
            _ => None,
        }),
        _ => None,
    }
}

/// RFC 6901 token escaping.
fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
