//! Error types for the projection core and the tabular loaders

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring or running a projection
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// The requested configuration cannot be satisfied (unknown role/shape,
    /// missing curve, out-of-range rate or ceiling)
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A single input row is unusable
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl ProjectionError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub(crate) fn input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors raised while reading curve or roster files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("row {row}: {source}")]
    Row {
        row: usize,
        source: ProjectionError,
    },
}
