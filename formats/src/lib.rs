//! Built-in string formats and YAML format configuration.
//!
//! The core crate ships with an empty format registry. This crate fills one:
//!
//! - [`register_builtin_formats`] / [`builtin_registry`] — common formats
//!   (`email`, `uri`, `date`, `date-time`, `ipv4`, `ipv6`, `uuid`,
//!   `hostname`).
//! - [`FormatsConfig`] — a YAML file selecting built-ins and declaring
//!   pattern-based formats, applied to an explicit registry or to the
//!   process-wide one.
//!
//! # Quick start
//!
//! ```no_run
//! use schema_types_core::transform;
//! use schema_types_formats::FormatsConfig;
//! use serde_json::json;
//!
//! // Register formats once at startup
//! FormatsConfig::load("formats.yml").unwrap().register_globally().unwrap();
//!
//! let ty = transform(&json!({ "type": "string", "format": "email" })).unwrap();
//! assert!(ty.accepts(&json!("ada@example.com")));
//! ```

mod builtin;
mod config;
mod error;

pub use builtin::{
    BUILTIN_FORMATS, builtin, builtin_names, builtin_registry, register_builtin,
    register_builtin_formats,
};
pub use config::FormatsConfig;
pub use error::{FormatsError, Result};
