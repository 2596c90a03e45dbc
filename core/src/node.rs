//! Typed keyword views over a decoded schema node.
//!
//! Keywords are explicit `Option` fields, so constructors branch on whether
//! a keyword is present rather than on its truthiness. Nested schemas stay
//! as raw [`Value`]s; the transform engine checks each one when it recurses.
//! `type` is not part of any view: the transform engine reads it straight
//! from the raw node so that a present-but-null `type` is still rejected.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

use crate::error::{Result, SchemaError};

/// The seven schema kinds the `type` keyword can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Null,
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

impl SchemaKind {
    /// Every kind, in declaration order.
    pub const ALL: [SchemaKind; 7] = [
        Self::Null,
        Self::String,
        Self::Number,
        Self::Integer,
        Self::Boolean,
        Self::Object,
        Self::Array,
    ];

    /// Returns the keyword spelling (`"string"`, `"null"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// Parses a keyword spelling; names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decodes the keywords a constructor reads from an object-shaped node.
///
/// Each constructor asks only for its own view, so a keyword that the chosen
/// kind never reads cannot fail the transform, whatever its JSON type.
/// Unrecognized keywords are ignored.
///
/// # Errors
///
/// Returns [`InvalidInput`](SchemaError::InvalidInput) if `schema` is not an
/// object, and [`MalformedSchema`](SchemaError::MalformedSchema) if a keyword
/// of the view holds the wrong JSON type.
pub(crate) fn keywords<T: DeserializeOwned>(schema: &Value) -> Result<T> {
    if !schema.is_object() {
        return Err(SchemaError::InvalidInput(schema.clone()));
    }
    T::deserialize(schema).map_err(|err| SchemaError::MalformedSchema {
        schema: schema.clone(),
        reason: err.to_string(),
    })
}

/// `enum` and `enumNames`, shared by the string and numeric kinds.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EnumKeywords {
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,
    pub enum_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StringKeywords {
    #[serde(default, deserialize_with = "whole_bound")]
    pub min_length: Option<usize>,
    #[serde(default, deserialize_with = "whole_bound")]
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
    pub format: Option<String>,
}

/// Keywords of the number and integer kinds.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NumericKeywords {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: Option<bool>,
    pub exclusive_maximum: Option<bool>,
    pub integer: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ObjectKeywords {
    pub description: Option<String>,
    pub properties: Option<BTreeMap<String, Value>>,
    #[serde(default, deserialize_with = "required_names")]
    pub required: Option<Vec<String>>,
}

impl ObjectKeywords {
    /// Returns `true` if `name` is listed in `required`.
    pub fn is_required(&self, name: &str) -> bool {
        self.required
            .as_ref()
            .is_some_and(|required| required.iter().any(|r| r == name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ArrayKeywords {
    pub items: Option<Value>,
    #[serde(default, deserialize_with = "whole_bound")]
    pub min_items: Option<usize>,
    #[serde(default, deserialize_with = "whole_bound")]
    pub max_items: Option<usize>,
    pub unique_items: Option<bool>,
}

/// `required` as a list of property names. The draft-3 boolean flag names
/// no properties and decodes as absent.
fn required_names<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Bool(_)) => Ok(None),
        Some(names) => Vec::<String>::deserialize(names).map(Some).map_err(D::Error::custom),
    }
}

/// Length and item bounds: non-negative whole numbers, written either as
/// integers or as integer-valued floats (`2.0`).
fn whole_bound<'de, D>(deserializer: D) -> std::result::Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(n) = number.as_u64() {
        return usize::try_from(n).map(Some).map_err(D::Error::custom);
    }
    match number.as_f64() {
        Some(n) if n >= 0.0 && n.fract() == 0.0 && n <= usize::MAX as f64 => Ok(Some(n as usize)),
        _ => Err(D::Error::custom(format!(
            "expected a non-negative whole number, got {number}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!(SchemaKind::from_name("string"), Some(SchemaKind::String));
        assert_eq!(SchemaKind::from_name("null"), Some(SchemaKind::Null));
        assert_eq!(SchemaKind::from_name("String"), None);
        assert_eq!(SchemaKind::from_name("date"), None);
        for kind in SchemaKind::ALL {
            assert_eq!(SchemaKind::from_name(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_reads_only_the_requested_view() {
        let schema = json!({
            "type": "string",
            "minLength": 2,
            "pattern": "^a",
            "enumNames": ["A"],
            "enum": ["a"],
            "required": true,
            "minimum": "not read by strings",
            "x-custom": true
        });

        let string: StringKeywords = keywords(&schema).unwrap();
        assert_eq!(string.min_length, Some(2));
        assert_eq!(string.max_length, None);
        assert_eq!(string.pattern.as_deref(), Some("^a"));

        let enums: EnumKeywords = keywords(&schema).unwrap();
        assert_eq!(enums.enum_values, Some(vec![json!("a")]));
        assert_eq!(enums.enum_names, Some(vec!["A".to_string()]));
    }

    #[test]
    fn test_numeric_bounds_accept_integers_and_floats() {
        let numeric: NumericKeywords = keywords(&json!({"minimum": 2, "maximum": 2.5})).unwrap();
        assert_eq!(numeric.minimum, Some(2.0));
        assert_eq!(numeric.maximum, Some(2.5));
    }

    #[test]
    fn test_length_bounds_accept_whole_floats() {
        let string: StringKeywords = keywords(&json!({"minLength": 2.0, "maxLength": 3})).unwrap();
        assert_eq!(string.min_length, Some(2));
        assert_eq!(string.max_length, Some(3));

        let array: ArrayKeywords = keywords(&json!({"minItems": 1.0})).unwrap();
        assert_eq!(array.min_items, Some(1));
    }

    #[test]
    fn test_length_bounds_reject_fractions_and_negatives() {
        for schema in [json!({"minLength": 2.5}), json!({"minLength": -1}), json!({"maxLength": "2"})] {
            let err = keywords::<StringKeywords>(&schema).unwrap_err();
            assert!(matches!(err, SchemaError::MalformedSchema { .. }), "schema {schema}");
        }
    }

    #[test]
    fn test_required_lookup() {
        let object: ObjectKeywords = keywords(&json!({"required": ["a", "b"]})).unwrap();
        assert!(object.is_required("a"));
        assert!(!object.is_required("c"));
        assert!(!ObjectKeywords::default().is_required("a"));
    }

    #[test]
    fn test_boolean_required_flag_names_nothing() {
        let object: ObjectKeywords = keywords(&json!({"required": true})).unwrap();
        assert_eq!(object.required, None);
        assert!(!object.is_required("a"));
    }

    #[test]
    fn test_required_must_list_names() {
        let err = keywords::<ObjectKeywords>(&json!({"required": ["a", 1]})).unwrap_err();
        assert!(matches!(err, SchemaError::MalformedSchema { .. }));
    }

    #[test]
    fn test_rejects_non_object() {
        let err = keywords::<StringKeywords>(&json!("string")).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidInput(v) if v == json!("string")));
    }

    #[test]
    fn test_rejects_mistyped_keyword() {
        let err = keywords::<ObjectKeywords>(&json!({"description": 5})).unwrap_err();
        assert!(matches!(err, SchemaError::MalformedSchema { .. }));
    }
}
