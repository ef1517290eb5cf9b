//! Error types for the extractor.
//!
//! Segmentation and rule extraction never fail on document structure; the
//! variants below cover the edges of a run: configuration, metadata, and
//! reading or writing files.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Invalid methodology identifier.
    #[error("Invalid methodology id: '{0}'. Expected letters, digits, '.', '_' or '-' (e.g., AR-AMS0001)")]
    InvalidMethodId(String),

    /// Invalid methodology version.
    #[error("Invalid methodology version: '{0}'. Expected letters, digits, '.', '_' or '-' (e.g., 1.0, v03-1)")]
    InvalidVersion(String),

    /// A configured pattern failed to compile.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration is structurally valid but semantically unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Raw text input is missing.
    #[error("No raw text input found at {}", .0.display())]
    MissingInput(PathBuf),

    /// One or more methodologies in a batch failed.
    #[error("{failed} of {total} methodologies failed")]
    BatchFailed { failed: usize, total: usize },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration parse error.
    #[error("YAML configuration failed to parse: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;
