//! Error types for the Crosswalk core library.
//!
//! Uses `thiserror` for public API error types. `compare` itself never fails;
//! errors come from export format selection, taxonomy loading, and
//! configuration.

use std::path::PathBuf;

/// Top-level error type for the Crosswalk core library.
#[derive(Debug, thiserror::Error)]
pub enum CrosswalkError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CrosswalkError {
    /// Shorthand for an [`CrosswalkError::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Errors from loading a reference taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    #[error("Taxonomy file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Taxonomy parse error: {message}")]
    Parse { message: String },

    #[error("Unknown theme '{theme}' (expected Knowledge, Skills or Values)")]
    UnknownTheme { theme: String },

    #[error("Taxonomy '{name}' contains no reference statements")]
    Empty { name: String },
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Configuration parse error: {message}")]
    ParseError { message: String },
}

/// A type alias for results using the top-level `CrosswalkError`.
pub type Result<T> = std::result::Result<T, CrosswalkError>;
