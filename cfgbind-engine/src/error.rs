//! Error types for the binding engine.

use cfgbind_model::ModelError;
use thiserror::Error;

/// Fatal engine errors. None of them are retried; each points at a
/// configuration or schema authoring defect.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Unresolvable node type, scalar cast failure, or a field that does not
    /// accept the bound value.
    #[error("mapping configuration error: {0}")]
    MappingConfiguration(String),

    /// Malformed binding path met during export.
    #[error("path resolution error: {0}")]
    PathResolution(String),

    /// Merge inputs are of different node types.
    #[error("cannot merge {overlay} into {base}")]
    MergeMismatch { base: String, overlay: String },

    /// Engine configuration could not be loaded.
    #[error("invalid engine config: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ModelError> for EngineError {
    fn from(err: ModelError) -> Self {
        EngineError::MappingConfiguration(err.to_string())
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
