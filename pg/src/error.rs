//! Error types for template loading, prompting and rendering

use std::path::PathBuf;

use thiserror::Error;

/// Errors from progen operations
#[derive(Debug, Error)]
pub enum ProgenError {
    /// Template directory or its `config.yml` does not exist
    #[error("Invalid template path: {}", path.display())]
    NotFound { path: PathBuf },

    /// The template configuration is malformed or references missing files
    #[error("Invalid template config {}: {reason}", path.display())]
    InvalidConfig { path: PathBuf, reason: String },

    /// Rendering was attempted before parameter values were set
    #[error("Template variables not initialized yet")]
    NotInitialized,

    /// Template substitution failed
    #[error("Failed to render template {file}: {message}")]
    Render { file: String, message: String },

    /// Interactive input could not be read
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Pre-supplied parameter values do not fit the parameter schema
    #[error("Invalid parameter value: {0}")]
    InvalidValue(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProgenError {
    pub(crate) fn invalid_config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for progen operations
pub type ProgenResult<T> = Result<T, ProgenError>;
