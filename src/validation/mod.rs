//! Schema validation module.
//!
//! The building blocks of one evaluation:
//! - Document parsing for schema and data text
//! - Schema compilation under a synthetic resource id
//! - Violation collection and rendering
//! - The evaluation error taxonomy

pub mod compiler;
pub mod document;
pub mod error;
pub mod violations;

pub use compiler::*;
pub use document::*;
pub use error::*;
pub use violations::*;
