//! Error types for matcache
//!
//! Library layers carry their own errors (`MatrixError`, `InversionError`);
//! the CLI and config layers use `MatcacheResult<T>`, which wraps them.

use crate::linalg::InversionError;
use crate::matrix::MatrixError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for matcache operations
pub type MatcacheResult<T> = Result<T, MatcacheError>;

/// All errors surfaced by the matcache binary
#[derive(Error, Debug)]
pub enum MatcacheError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Input errors
    #[error("Invalid matrix input {path}: {reason}")]
    MatrixInput { path: PathBuf, reason: String },

    #[error("Matrix error: {0}")]
    Matrix(#[from] MatrixError),

    // Solver errors
    #[error("Inversion failed: {0}")]
    Inversion(#[from] InversionError),

    #[error("Verification failed: residual {residual:e} exceeds {max_error:e}")]
    VerificationFailed { residual: f64, max_error: f64 },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl MatcacheError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Inversion(InversionError::Singular { .. }) => {
                Some("The matrix has no inverse. Check for linearly dependent rows or lower --tolerance")
            }
            Self::Inversion(InversionError::NotSquare { .. }) => {
                Some("Only square matrices can be inverted")
            }
            Self::Inversion(InversionError::Overflow) => {
                Some("Entries are too large for f64 elimination. Rescale the matrix and try again")
            }
            Self::MatrixInput { .. } => Some("Expected a JSON array of rows, e.g. [[1, 0], [1, 2]]"),
            Self::ConfigInvalid { .. } => Some("Run: matcache config init --force"),
            _ => None,
        }
    }
}
