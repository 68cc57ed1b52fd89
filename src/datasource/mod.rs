//! Host binding for the `validate_json` data source.
//!
//! The attribute set is declared once in [`attributes`]; configs are
//! checked against that declaration before being deserialised into the
//! request model, and state is serialised from the response model.
//! - `attributes` - Declared attribute schema
//! - `model` - Request/state models
//! - `diagnostics` - Host-facing error reporting
//! - `read` - The read handler

pub mod attributes;
pub mod diagnostics;
pub mod model;
pub mod read;

pub use attributes::*;
pub use diagnostics::*;
pub use model::*;
pub use read::*;
