//! Error types for Podshift
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Podshift operations
pub type PodshiftResult<T> = Result<T, PodshiftError>;

/// Main error type for Podshift operations
#[derive(Error, Debug)]
pub enum PodshiftError {
    /// Input text is not well-formed YAML
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// Input parsed but violates the Compose structure
    #[error("{location}: {message}")]
    Structural { location: String, message: String },

    /// A construct no target format can represent
    #[error("{rule}: {message}")]
    Blocking { rule: String, message: String },

    /// Requested format id is not one of the supported ids
    #[error("unknown output format '{id}'")]
    UnknownFormat { id: String },

    /// An emitter could not render the document
    #[error("{format} emission failed: {message}")]
    Emission { format: String, message: String },

    /// Invalid configuration file
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PodshiftError {
    pub fn structural(location: impl Into<String>, message: impl Into<String>) -> Self {
        PodshiftError::Structural {
            location: location.into(),
            message: message.into(),
        }
    }

    pub fn blocking(rule: impl Into<String>, message: impl Into<String>) -> Self {
        PodshiftError::Blocking {
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// True for errors raised before any rule runs
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            PodshiftError::Syntax { .. } | PodshiftError::Structural { .. }
        )
    }
}
