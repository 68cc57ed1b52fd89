//! Document parsing.
//!
//! Both inputs arrive as untrusted text. Parsing is the first gate: a
//! document that is not well-formed JSON never reaches the compiler or
//! the validator.

use std::fmt;

use serde_json::error::Category;
use serde_json::Value;

/// `serde_json` syntax errors raised on well-formed JSON text that the
/// parser cannot represent, rather than on an unexpected character.
const UNREPRESENTABLE_ERRORS: &[&str] = &[
    "number out of range",
    "recursion limit exceeded",
    "unexpected end of hex escape",
    "lone leading surrogate in hex escape",
    "invalid unicode code point",
];

/// Why a document failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// Input ended before the value was complete.
    Eof,
    /// The parser rejected this character.
    InvalidCharacter(char),
    /// Syntactically valid JSON the parser cannot hold (out-of-range
    /// numbers, nesting past the depth limit, unpaired surrogates).
    Unrepresentable,
    Other,
}

/// A JSON parse failure with the location the parser stopped at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentError {
    pub failure: ParseFailure,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl DocumentError {
    fn from_serde(text: &str, err: &serde_json::Error) -> Self {
        let message = err.to_string();

        let failure = match err.classify() {
            Category::Eof => ParseFailure::Eof,
            Category::Syntax
                if UNREPRESENTABLE_ERRORS
                    .iter()
                    .any(|known| message.starts_with(known)) =>
            {
                ParseFailure::Unrepresentable
            }
            Category::Syntax => offending_char(text, err.line(), err.column())
                .map(ParseFailure::InvalidCharacter)
                .unwrap_or(ParseFailure::Other),
            Category::Io | Category::Data => ParseFailure::Other,
        };

        Self {
            failure,
            message,
            line: err.line(),
            column: err.column(),
        }
    }
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.failure {
            ParseFailure::Eof => write!(f, "unexpected end of JSON input: {}", self.message),
            ParseFailure::InvalidCharacter(c) => {
                write!(f, "invalid character {:?}: {}", c, self.message)
            }
            ParseFailure::Unrepresentable => {
                write!(f, "unsupported JSON value: {}", self.message)
            }
            ParseFailure::Other => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for DocumentError {}

/// Locate the character the parser rejected.
///
/// `serde_json` reports a 1-based line and a 1-based byte column pointing
/// at the rejected byte. Column 0 means the parser had not consumed
/// anything on that line.
fn offending_char(text: &str, line: usize, column: usize) -> Option<char> {
    if line == 0 || column == 0 {
        return None;
    }
    let line_text = text.split('\n').nth(line - 1)?;
    line_text.get(column - 1..)?.chars().next()
}

fn parse(text: &str) -> Result<Value, DocumentError> {
    serde_json::from_str(text).map_err(|e| DocumentError::from_serde(text, &e))
}

/// A parsed schema document, not yet compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument(Value);

impl SchemaDocument {
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        parse(text).map(Self)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// A parsed data document.
#[derive(Debug, Clone, PartialEq)]
pub struct DataDocument(Value);

impl DataDocument {
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        parse(text).map(Self)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}
