//! Error types for format configuration.
//!
//! Covers reading and writing config files, compiling pattern formats and
//! registration failures reported by the core registry.

use schema_types_core::SchemaError;
use thiserror::Error;

/// Errors that can occur while loading or applying format configuration.
#[derive(Debug, Error)]
pub enum FormatsError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A pattern format does not compile.
    #[error("invalid pattern for format {name}: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// The config asks for a built-in format that does not exist.
    #[error("unknown built-in format: {0}")]
    UnknownBuiltin(String),

    /// Registration failure (e.g. duplicate format name).
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Convenience alias for results with [`FormatsError`].
pub type Result<T> = std::result::Result<T, FormatsError>;
