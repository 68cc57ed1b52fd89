//! Evaluation pipeline module.
//!
//! Coordinates one schema validation request:
//! - Schema and data parsing
//! - Schema compilation
//! - Validation
//! - Classification against the failure policy

pub mod context;
pub mod evaluator;

pub use context::*;
pub use evaluator::*;
