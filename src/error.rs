use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Everything that can go wrong while building or feeding a network.
///
/// Only `Allocation` can happen once a network exists; the rest are raised
/// while validating a `NetworkSpec` or loading one from disk.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// A parameter or scratch buffer could not be reserved.
    #[error("failed to allocate {what} ({rows}x{cols})")]
    Allocation {
        what: &'static str,
        rows: usize,
        cols: usize,
    },

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("invalid hyperparameter: {0}")]
    InvalidHyperparameter(String),

    /// A caller-supplied vector does not match the layer it feeds.
    #[error("{what} has length {actual}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
