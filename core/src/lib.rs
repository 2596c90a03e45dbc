//! Compile JSON-Schema-like documents into runtime type descriptors.
//!
//! Given an already decoded schema tree ([`serde_json::Value`]), [`transform`]
//! produces a [`TypeDescriptor`] that can later check arbitrary values:
//!
//! - [`Predicate`] — constraint checks (`minLength`, `minimum`,
//!   `uniqueItems`, ...) composed with [`and`].
//! - [`FormatRegistry`] — named string formats referenced by the `format`
//!   keyword, either passed explicitly to a [`Transformer`] or registered
//!   process-wide with [`register_format`].
//! - [`TypeDescriptor`] — the output: primitives, enumerations, refined
//!   types, records, lists, tuples and unions.
//!
//! Supported keywords are `type`, `enum`, `enumNames`, `minLength`,
//! `maxLength`, `pattern`, `format`, `minimum`, `maximum`,
//! `exclusiveMinimum`, `exclusiveMaximum`, `integer`, `properties`,
//! `required`, `description`, `items`, `minItems`, `maxItems` and
//! `uniqueItems`. `$ref` is not resolved.
//!
//! # Example
//!
//! ```
//! use schema_types_core::*;
//! use serde_json::json;
//!
//! let mut formats = FormatRegistry::new();
//! formats.register("email", |s| s.contains('@')).unwrap();
//!
//! let person = Transformer::new(&formats)
//!     .transform(&json!({
//!         "type": "object",
//!         "description": "Person",
//!         "properties": {
//!             "name": { "type": "string", "minLength": 1 },
//!             "email": { "type": "string", "format": "email" },
//!             "age": { "type": ["integer", "null"], "minimum": 0 },
//!             "admin": { "type": "boolean" }
//!         },
//!         "required": ["name"]
//!     }))
//!     .unwrap();
//!
//! assert_eq!(person.to_string(), "Person");
//! assert!(person.accepts(&json!({ "name": "Ada", "admin": false })));
//! assert!(!person.accepts(&json!({ "name": "Ada" })));
//! assert!(!person.accepts(&json!({ "name": "Ada", "admin": true, "email": "nope" })));
//! ```

mod constructors;
mod descriptor;
mod error;
mod format;
mod node;
mod predicate;
mod transform;

pub use descriptor::{
    DescriptorKind, EnumEntry, Enumeration, Field, Primitive, Record, Refinement, TypeDescriptor,
};
pub use error::{Result, SchemaError};
pub use format::{
    Format, FormatFn, FormatRegistry, register_format, register_formats, reset_formats,
    with_global_formats,
};
pub use node::SchemaKind;
pub use predicate::{Predicate, and, is_whole_number};
pub use transform::{Transformer, transform};
