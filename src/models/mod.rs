//! Domain models for vectrag.
//!
//! - [`Model`]: a named content schema, stored as one file keyed by its slug.
//! - [`Field`]: a typed attribute of a model whose id survives edits.
//! - [`FieldType`] and [`Status`]: closed registries checked by the validator.
//!
//! Validation is pure and lives in [`validate_model`] / [`validate_field`].

mod field;
mod model;
mod status;
mod validation;

pub use field::*;
pub use model::*;
pub use status::*;
pub use validation::*;
