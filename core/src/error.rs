//! Error types for schema transformation and format registration.
//!
//! Every failure is fatal to the call that raised it. Errors carry the
//! offending schema fragment or format name so callers can report them.

use serde_json::Value;
use thiserror::Error;

/// Errors raised while registering formats or transforming a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A format with this name is already registered.
    #[error("duplicated format: {0}")]
    DuplicateFormat(String),

    /// A string schema references a format that was never registered.
    #[error("missing format {0}, register it before transforming")]
    UnknownFormat(String),

    /// `enum` and `enumNames` have different lengths.
    #[error("enumNames ({names} entries) and enum ({values} entries) of unequal length")]
    EnumLengthMismatch { values: usize, names: usize },

    /// The `type` keyword is malformed or names an unknown kind.
    #[error("unsupported json schema {0}")]
    UnsupportedSchema(Value),

    /// A schema node is not an object.
    #[error("schema must be an object, got {0}")]
    InvalidInput(Value),

    /// A keyword read by the node's kind holds a value of the wrong JSON type.
    #[error("malformed schema {schema}: {reason}")]
    MalformedSchema { schema: Value, reason: String },

    /// The `pattern` keyword is not a valid regular expression.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Convenience alias for results with [`SchemaError`].
pub type Result<T> = std::result::Result<T, SchemaError>;
