//! Core type definitions for cfgbind.
//!
//! This crate defines the leaf types every other cfgbind crate depends on:
//! - [`NodeId`]: the stable identity carried by every bound node
//! - [`ScalarKind`] / [`ScalarValue`]: the scalar vocabulary of field bindings
//! - [`ScalarType`]: the Rust types a scalar field may be declared with
//!
//! Nothing here knows about trees, schemas or graphs.

mod ids;
mod scalar;

pub use ids::NodeId;
pub use scalar::{ScalarKind, ScalarType, ScalarValue};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("cannot cast {raw:?} to {kind}")]
    InvalidScalar { kind: ScalarKind, raw: String },

    #[error("unknown scalar kind: {0}")]
    UnknownScalarKind(String),
}
