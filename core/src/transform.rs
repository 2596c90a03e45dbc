//! Recursive schema-to-type dispatch.
//!
//! The engine inspects the `type` keyword of a node and hands the node to
//! the constructor for that kind. A sequence of kinds transforms the same
//! node once per kind and joins the results into a union, in declared
//! order, so constraints such as `minimum` apply to every branch alike.
//!
//! # Examples
//!
//! ```
//! use schema_types_core::{DescriptorKind, FormatRegistry, Transformer};
//! use serde_json::json;
//!
//! let mut formats = FormatRegistry::new();
//! formats.register("slug", |s| s.chars().all(|c| c.is_ascii_lowercase() || c == '-')).unwrap();
//!
//! let ty = Transformer::new(&formats)
//!     .transform(&json!({
//!         "type": "object",
//!         "properties": {
//!             "slug": { "type": "string", "format": "slug" },
//!             "tags": { "type": "array", "items": { "type": "string" }, "uniqueItems": true }
//!         },
//!         "required": ["slug"]
//!     }))
//!     .unwrap();
//!
//! assert_eq!(ty.kind(), DescriptorKind::Struct);
//! assert!(ty.accepts(&json!({ "slug": "hello-world" })));
//! assert!(!ty.accepts(&json!({ "slug": "Hello" })));
//! assert!(!ty.accepts(&json!({ "slug": "a", "tags": ["x", "x"] })));
//! ```

use serde_json::Value;
use tracing::{debug, trace};

use crate::constructors;
use crate::descriptor::TypeDescriptor;
use crate::error::{Result, SchemaError};
use crate::format::{FormatRegistry, with_global_formats};
use crate::node::SchemaKind;

/// Transforms schema nodes against an explicit format registry.
#[derive(Debug, Clone, Copy)]
pub struct Transformer<'a> {
    formats: &'a FormatRegistry,
}

impl<'a> Transformer<'a> {
    /// Creates a transformer resolving `format` keywords in `formats`.
    pub fn new(formats: &'a FormatRegistry) -> Self {
        Self { formats }
    }

    /// Returns the registry used for `format` lookups.
    pub fn formats(&self) -> &'a FormatRegistry {
        self.formats
    }

    /// Builds the type descriptor for `schema`.
    ///
    /// # Errors
    ///
    /// - [`InvalidInput`](SchemaError::InvalidInput) if `schema` (or a nested
    ///   schema) is not an object.
    /// - [`UnsupportedSchema`](SchemaError::UnsupportedSchema) if `type` is
    ///   neither a known kind name nor a non-empty sequence of them.
    /// - [`MalformedSchema`](SchemaError::MalformedSchema) if a keyword the
    ///   selected kind reads has the wrong JSON type; keywords of other kinds
    ///   are ignored.
    /// - [`UnknownFormat`](SchemaError::UnknownFormat),
    ///   [`EnumLengthMismatch`](SchemaError::EnumLengthMismatch) or
    ///   [`InvalidPattern`](SchemaError::InvalidPattern) from the constructors.
    pub fn transform(&self, schema: &Value) -> Result<TypeDescriptor> {
        let Some(object) = schema.as_object() else {
            return Err(SchemaError::InvalidInput(schema.clone()));
        };
        let Some(kind) = object.get("type") else {
            trace!("schema has no type, accepting anything");
            return Ok(TypeDescriptor::Any);
        };

        let unsupported = || SchemaError::UnsupportedSchema(schema.clone());
        match kind {
            Value::String(name) => {
                let kind = SchemaKind::from_name(name).ok_or_else(unsupported)?;
                debug!(%kind, "transforming schema");
                self.construct(kind, schema)
            }
            Value::Array(names) if !names.is_empty() => {
                let kinds = names
                    .iter()
                    .map(|name| name.as_str().and_then(SchemaKind::from_name))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(unsupported)?;
                debug!(branches = kinds.len(), "transforming union schema");
                let branches = kinds
                    .into_iter()
                    .map(|kind| self.construct(kind, schema))
                    .collect::<Result<Vec<_>>>()?;
                Ok(TypeDescriptor::Union(branches))
            }
            _ => Err(unsupported()),
        }
    }

    fn construct(&self, kind: SchemaKind, schema: &Value) -> Result<TypeDescriptor> {
        let ty = match kind {
            SchemaKind::String => constructors::string(schema, self),
            SchemaKind::Number => constructors::number(schema, self),
            SchemaKind::Integer => constructors::integer(schema, self),
            SchemaKind::Boolean => constructors::boolean(schema, self),
            SchemaKind::Object => constructors::object(schema, self),
            SchemaKind::Array => constructors::array(schema, self),
            SchemaKind::Null => constructors::null(schema, self),
        }?;
        trace!(%kind, descriptor = %ty, "constructed type");
        Ok(ty)
    }
}

/// Builds the type descriptor for `schema` using the process-wide format
/// registry.
///
/// Holds the registry's read lock for the duration of the call. See
/// [`Transformer::transform`] for the error cases.
///
/// # Examples
///
/// ```
/// use schema_types_core::{Primitive, TypeDescriptor, transform};
/// use serde_json::json;
///
/// assert_eq!(transform(&json!({})).unwrap(), TypeDescriptor::Any);
///
/// let ty = transform(&json!({ "type": "string", "minLength": 2 })).unwrap();
/// assert!(ty.accepts(&json!("aa")));
/// assert!(!ty.accepts(&json!("a")));
/// ```
pub fn transform(schema: &Value) -> Result<TypeDescriptor> {
    with_global_formats(|formats| Transformer::new(formats).transform(schema))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::descriptor::{DescriptorKind, Primitive};

    fn transform_local(schema: Value) -> Result<TypeDescriptor> {
        let registry = FormatRegistry::new();
        Transformer::new(&registry).transform(&schema)
    }

    #[test]
    fn test_missing_type_is_any() {
        assert_eq!(transform_local(json!({})).unwrap(), TypeDescriptor::Any);
        assert_eq!(
            transform_local(json!({"minLength": "ignored"})).unwrap(),
            TypeDescriptor::Any
        );
    }

    #[test]
    fn test_single_kinds() {
        let cases = [
            ("string", Primitive::String),
            ("number", Primitive::Number),
            ("integer", Primitive::Integer),
            ("boolean", Primitive::Boolean),
            ("object", Primitive::Object),
            ("array", Primitive::Array),
            ("null", Primitive::Null),
        ];
        for (name, primitive) in cases {
            let ty = transform_local(json!({ "type": name })).unwrap();
            assert_eq!(ty, TypeDescriptor::Primitive(primitive), "type {name}");
        }
    }

    #[test]
    fn test_union_preserves_order_and_shares_constraints() {
        let ty = transform_local(json!({"type": ["integer", "string"], "minimum": 3})).unwrap();
        assert_eq!(ty.kind(), DescriptorKind::Union);
        let TypeDescriptor::Union(branches) = &ty else {
            unreachable!();
        };
        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0].kind(), DescriptorKind::Subtype);
        assert_eq!(branches[1], TypeDescriptor::Primitive(Primitive::String));
        assert!(ty.accepts(&json!(3)));
        assert!(!ty.accepts(&json!(2)));
        assert!(ty.accepts(&json!("2")));
    }

    #[test]
    fn test_rejects_non_object_input() {
        for input in [json!(null), json!("string"), json!([{"type": "string"}]), json!(1)] {
            let err = transform_local(input.clone()).unwrap_err();
            assert!(matches!(err, SchemaError::InvalidInput(ref v) if *v == input));
        }
    }

    #[test]
    fn test_rejects_unsupported_type_shapes() {
        for schema in [
            json!({"type": "date"}),
            json!({"type": 7}),
            json!({"type": null}),
            json!({"type": []}),
            json!({"type": ["string", "date"]}),
            json!({"type": ["string", 1]}),
        ] {
            let err = transform_local(schema.clone()).unwrap_err();
            assert!(
                matches!(err, SchemaError::UnsupportedSchema(ref v) if *v == schema),
                "schema {schema}"
            );
        }
    }

    #[test]
    fn test_nested_non_object_is_invalid_input() {
        let err = transform_local(json!({
            "type": "object",
            "properties": { "a": "string" }
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidInput(v) if v == json!("string")));
    }

    #[test]
    fn test_unknown_format_fails() {
        let err = transform_local(json!({"type": "string", "format": "email"})).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownFormat(ref name) if name == "email"));
    }

    #[test]
    fn test_registered_format_is_applied() {
        let mut registry = FormatRegistry::new();
        registry.register("email", |s| s.contains('@')).unwrap();
        let ty = Transformer::new(&registry)
            .transform(&json!({"type": "string", "format": "email"}))
            .unwrap();
        assert!(ty.accepts(&json!("a@b.c")));
        assert!(!ty.accepts(&json!("abc")));
    }
}
