//! Error types for schema declaration and field dispatch.

use thiserror::Error;

/// Errors raised while resolving bindings or dispatching field access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Declared node type is neither a scalar keyword, `array`, nor a registered type.
    #[error("invalid property type {node_type} in node {owner}")]
    InvalidPropertyType { node_type: String, owner: String },

    /// An `array` binding without a resolvable element type.
    #[error("array field {field} in node {owner} declares no element type")]
    MissingElementType { field: String, owner: String },

    /// A binding exists but the type has no accessor for it.
    #[error("node {owner} has no accessor for field {field}")]
    UnknownField { field: String, owner: String },

    /// The value handed to an accessor does not fit the field.
    #[error("field {field} of node {owner} expects {expected}")]
    TypeMismatch {
        field: String,
        owner: String,
        expected: String,
    },

    /// A node was handed to the schema of a different type.
    #[error("expected node of type {expected}, found {found}")]
    WrongNode { expected: String, found: String },

    /// Value access on a type that does not wrap a value.
    #[error("node {0} does not wrap a value")]
    NotAValueWrapper(String),

    #[error(transparent)]
    Scalar(#[from] cfgbind_types::Error),
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
