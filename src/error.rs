//! Error type shared by the operators, the noise injector and the engine

/// Errors raised by morphotype operations
#[derive(Debug, thiserror::Error)]
pub enum SteError {
    #[error("Morphotype not found: {0}")]
    NotFound(String),

    #[error("Shape mismatch: expected length {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Morphotype '{name}' has length {actual}, engine dimension is {expected}")]
    DimensionMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SteError>;
