//! Declared attribute schema for the data source.

use lazy_static::lazy_static;
use serde::Serialize;
use serde_json::Value;

use super::diagnostics::Diagnostics;

/// Value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
    Bool,
}

impl AttributeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Bool => "bool",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            AttributeType::String => value.is_string(),
            AttributeType::Bool => value.is_boolean(),
        }
    }
}

/// Who supplies an attribute's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeMode {
    Required,
    Optional,
    Computed,
}

#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    pub mode: AttributeMode,
    pub markdown_description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataSourceSchema {
    pub markdown_description: &'static str,
    pub attributes: Vec<Attribute>,
}

impl DataSourceSchema {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Check a config object against the declared attributes.
    ///
    /// Null values count as unset. Every problem is reported, not just
    /// the first.
    pub fn check_config(&self, config: &Value) -> Diagnostics {
        let mut diags = Diagnostics::new();

        let Some(obj) = config.as_object() else {
            diags.add_error(
                "Invalid Configuration",
                format!("expected an object of attributes, got {}", json_kind(config)),
            );
            return diags;
        };

        for attr in &self.attributes {
            let value = obj.get(attr.name).filter(|v| !v.is_null());

            match (attr.mode, value) {
                (AttributeMode::Required, None) => diags.add_error(
                    "Invalid Configuration",
                    format!("the argument \"{}\" is required, but no definition was found", attr.name),
                ),
                (AttributeMode::Computed, Some(_)) => diags.add_error(
                    "Invalid Configuration",
                    format!("\"{}\" is computed and cannot be set in configuration", attr.name),
                ),
                (_, Some(v)) if !attr.attr_type.accepts(v) => diags.add_error(
                    "Invalid Configuration",
                    format!(
                        "\"{}\": expected {}, got {}",
                        attr.name,
                        attr.attr_type.as_str(),
                        json_kind(v)
                    ),
                ),
                _ => {}
            }
        }

        for key in obj.keys() {
            if self.attribute(key).is_none() {
                diags.add_error(
                    "Invalid Configuration",
                    format!("an argument named \"{key}\" is not expected here"),
                );
            }
        }

        diags
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

lazy_static! {
    /// Attributes of the `validate_json` data source.
    pub static ref VALIDATE_JSON_SCHEMA: DataSourceSchema = DataSourceSchema {
        markdown_description: "Data source that can be used to validate a JSON document against a JSON schema.",
        attributes: vec![
            Attribute {
                name: "json_schema",
                attr_type: AttributeType::String,
                mode: AttributeMode::Required,
                markdown_description: "The expected JSON schema of the provided object - must be valid JSONSchema.",
            },
            Attribute {
                name: "json_object",
                attr_type: AttributeType::String,
                mode: AttributeMode::Required,
                markdown_description: "The object to check the type of - must be valid JSON.",
            },
            Attribute {
                name: "is_valid",
                attr_type: AttributeType::Bool,
                mode: AttributeMode::Computed,
                markdown_description: "Whether or not the provided object is valid according to the provided schema.",
            },
            Attribute {
                name: "validation_errors",
                attr_type: AttributeType::String,
                mode: AttributeMode::Computed,
                markdown_description: "A human-readable string containing one or more validation errors. This will always be empty if is_valid is true.",
            },
            Attribute {
                name: "fail_on_validation_error",
                attr_type: AttributeType::Bool,
                mode: AttributeMode::Optional,
                markdown_description: "Whether or not an error should be raised if any validation errors are discovered.",
            },
        ],
    };
}
