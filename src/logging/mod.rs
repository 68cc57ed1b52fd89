//! Structured logging with evaluation context.
//!
//! Provides logging macros and utilities that include the evaluation id
//! in every log message for easy correlation.

pub mod structured;

pub use structured::*;
