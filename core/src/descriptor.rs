//! Type descriptors produced by the transform engine.
//!
//! A [`TypeDescriptor`] describes how to check a conforming value. It is a
//! plain tree: built fresh per transformation, immutable afterwards, and
//! safe to share across threads.

use std::fmt;

use serde_json::Value;

use crate::predicate::{Predicate, is_whole_number};

/// Base types that need no further configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Any JSON string.
    String,
    /// Any JSON number.
    Number,
    /// A JSON number with no fractional part.
    Integer,
    /// `true` or `false`.
    Boolean,
    /// Any JSON object.
    Object,
    /// Any JSON array.
    Array,
    /// Exactly `null`.
    Null,
}

impl Primitive {
    /// Returns `true` if `value` has this base type.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => is_whole_number(value),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
            Self::Null => value.is_null(),
        }
    }

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "Str",
            Self::Number => "Num",
            Self::Integer => "Int",
            Self::Boolean => "Bool",
            Self::Object => "Obj",
            Self::Array => "Arr",
            Self::Null => "Nil",
        }
    }
}

/// One allowed value of an [`Enumeration`], with its optional display label.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumEntry {
    pub value: Value,
    pub label: Option<String>,
}

impl EnumEntry {
    /// Returns the label, falling back to the value's text.
    pub fn display_label(&self) -> String {
        match (&self.label, &self.value) {
            (Some(label), _) => label.clone(),
            (None, Value::String(s)) => s.clone(),
            (None, other) => other.to_string(),
        }
    }
}

/// A fixed set of allowed values.
#[derive(Debug, Clone, PartialEq)]
pub struct Enumeration {
    pub entries: Vec<EnumEntry>,
}

impl Enumeration {
    /// Builds an enumeration whose values are their own labels.
    pub fn of(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            entries: values
                .into_iter()
                .map(|value| EnumEntry { value, label: None })
                .collect(),
        }
    }

    /// Returns `true` if `value` is one of the allowed values.
    pub fn contains(&self, value: &Value) -> bool {
        self.entries.iter().any(|entry| entry.value == *value)
    }

    /// Returns the label attached to `value`, if it is allowed.
    pub fn label_for(&self, value: &Value) -> Option<String> {
        self.entries
            .iter()
            .find(|entry| entry.value == *value)
            .map(EnumEntry::display_label)
    }
}

/// A base type narrowed by a predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Refinement {
    pub base: Box<TypeDescriptor>,
    pub predicate: Predicate,
}

/// A named field of a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: TypeDescriptor,
    /// Optional fields may be absent or `null`.
    pub optional: bool,
}

/// A structural record with typed fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Label taken from the schema `description`.
    pub name: Option<String>,
    pub fields: Vec<Field>,
}

impl Record {
    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Variant tag of a [`TypeDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    Any,
    Primitive,
    Enums,
    Subtype,
    Struct,
    List,
    Tuple,
    Union,
}

impl DescriptorKind {
    /// Returns the lowercase tag name (`"subtype"`, `"struct"`, ...), which
    /// is also the `Display` form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Primitive => "primitive",
            Self::Enums => "enums",
            Self::Subtype => "subtype",
            Self::Struct => "struct",
            Self::List => "list",
            Self::Tuple => "tuple",
            Self::Union => "union",
        }
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How to validate a value conforming to a schema.
///
/// # Examples
///
/// ```
/// use schema_types_core::{Primitive, TypeDescriptor};
/// use serde_json::json;
///
/// let ty = TypeDescriptor::Union(vec![
///     TypeDescriptor::Primitive(Primitive::Number),
///     TypeDescriptor::Primitive(Primitive::String),
/// ]);
/// assert!(ty.accepts(&json!(1)));
/// assert!(ty.accepts(&json!("one")));
/// assert!(!ty.accepts(&json!(null)));
/// assert_eq!(ty.to_string(), "Num | Str");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// Accepts every value.
    Any,
    /// A base type check.
    Primitive(Primitive),
    /// One of a fixed set of values.
    Enumerated(Enumeration),
    /// A base type plus a predicate.
    Refined(Refinement),
    /// An object with named, typed fields.
    Record(Record),
    /// An array whose elements all share one type.
    List(Box<TypeDescriptor>),
    /// A fixed-length array with a type per position.
    Tuple(Vec<TypeDescriptor>),
    /// At least one alternative must match, tried in order.
    Union(Vec<TypeDescriptor>),
}

impl TypeDescriptor {
    /// Wraps `base` with `predicate`.
    pub fn refined(base: TypeDescriptor, predicate: Predicate) -> Self {
        Self::Refined(Refinement {
            base: Box::new(base),
            predicate,
        })
    }

    /// Returns the variant tag.
    pub fn kind(&self) -> DescriptorKind {
        match self {
            Self::Any => DescriptorKind::Any,
            Self::Primitive(_) => DescriptorKind::Primitive,
            Self::Enumerated(_) => DescriptorKind::Enums,
            Self::Refined(_) => DescriptorKind::Subtype,
            Self::Record(_) => DescriptorKind::Struct,
            Self::List(_) => DescriptorKind::List,
            Self::Tuple(_) => DescriptorKind::Tuple,
            Self::Union(_) => DescriptorKind::Union,
        }
    }

    /// Returns `true` if `value` conforms to this descriptor.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Primitive(primitive) => primitive.accepts(value),
            Self::Enumerated(enumeration) => enumeration.contains(value),
            Self::Refined(refinement) => {
                refinement.base.accepts(value) && refinement.predicate.test(value)
            }
            Self::Record(record) => {
                let Some(object) = value.as_object() else {
                    return false;
                };
                record.fields.iter().all(|field| match object.get(&field.name) {
                    None | Some(Value::Null) if field.optional => true,
                    None => false,
                    Some(v) => field.ty.accepts(v),
                })
            }
            Self::List(element) => value
                .as_array()
                .is_some_and(|items| items.iter().all(|item| element.accepts(item))),
            Self::Tuple(positions) => value.as_array().is_some_and(|items| {
                items.len() == positions.len()
                    && positions.iter().zip(items).all(|(ty, item)| ty.accepts(item))
            }),
            Self::Union(branches) => branches.iter().any(|branch| branch.accepts(value)),
        }
    }

    /// Returns the descriptor that accepts `value`.
    ///
    /// For a union this is the first branch, in declared order, that accepts
    /// the value. Any other descriptor returns itself when it accepts.
    pub fn dispatch(&self, value: &Value) -> Option<&TypeDescriptor> {
        match self {
            Self::Union(branches) => branches.iter().find(|branch| branch.accepts(value)),
            other => other.accepts(value).then_some(other),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Primitive(primitive) => f.write_str(primitive.name()),
            Self::Enumerated(enumeration) => {
                let labels: Vec<String> = enumeration
                    .entries
                    .iter()
                    .map(|entry| format!("{:?}", entry.display_label()))
                    .collect();
                write!(f, "({})", labels.join(" | "))
            }
            Self::Refined(refinement) => {
                write!(f, "{{{} | {}}}", refinement.base, refinement.predicate)
            }
            Self::Record(Record { name: Some(name), .. }) => f.write_str(name),
            Self::Record(record) => {
                let fields: Vec<String> = record
                    .fields
                    .iter()
                    .map(|field| {
                        let marker = if field.optional { "?" } else { "" };
                        format!("{}{marker}: {}", field.name, field.ty)
                    })
                    .collect();
                write!(f, "{{{}}}", fields.join(", "))
            }
            Self::List(element) => write!(f, "Array<{element}>"),
            Self::Tuple(positions) => {
                let positions: Vec<String> = positions.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", positions.join(", "))
            }
            Self::Union(branches) => {
                let branches: Vec<String> = branches.iter().map(ToString::to_string).collect();
                f.write_str(&branches.join(" | "))
            }
        }
    }
}
