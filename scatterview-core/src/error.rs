//! Error types for scatterview

use thiserror::Error;

/// Errors raised while resolving a column selection against a dataset.
///
/// These are recoverable: the widget reports them to the host and keeps the
/// last good point buffer on screen.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("no dataset is attached")]
    NoDataset,

    #[error("no column selection is available")]
    NoSelection,

    #[error("column '{column}' not found in dataset '{dataset}'")]
    MissingColumn { dataset: String, column: String },

    #[error("request for dataset '{requested}' sent to dataset '{actual}'")]
    DatasetMismatch { requested: String, actual: String },

    #[error("column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("size column '{column}' has negative value {value} at row {row}")]
    NegativeSize { column: String, row: usize, value: f64 },

    #[error("column '{column}' has non-finite value at row {row}")]
    NonFiniteValue { column: String, row: usize },
}

/// Main error type for scatterview operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Shader compilation failed: {0}")]
    ShaderCompilation(String),

    #[error("Invalid renderer state: {0}")]
    InvalidState(String),

    #[error("Visualization error: {0}")]
    Visualization(String),
}

/// Result type alias for scatterview operations
pub type Result<T> = std::result::Result<T, Error>;
