//! One type constructor per schema kind.
//!
//! Each constructor decodes only the keywords its kind reads from the raw
//! schema node and returns exactly one [`TypeDescriptor`]; keywords that
//! belong to other kinds are never looked at. Constraints present on the
//! node are folded into a
//! single predicate with [`and`]; a node with no constraints yields the bare
//! base type. Object and array constructors recurse through the
//! [`Transformer`] for nested schemas.

use regex::Regex;
use serde_json::Value;

use crate::descriptor::{EnumEntry, Enumeration, Field, Primitive, Record, TypeDescriptor};
use crate::error::{Result, SchemaError};
use crate::node::{
    ArrayKeywords, EnumKeywords, NumericKeywords, ObjectKeywords, StringKeywords, keywords,
};
use crate::predicate::{Predicate, and};
use crate::transform::Transformer;

pub(crate) fn string(schema: &Value, cx: &Transformer<'_>) -> Result<TypeDescriptor> {
    if let Some(enumerated) = enumeration(schema)? {
        return Ok(enumerated);
    }

    let node: StringKeywords = keywords(schema)?;
    let mut predicate = None;
    if let Some(min) = node.min_length {
        predicate = Some(and(predicate, Predicate::MinLength(min)));
    }
    if let Some(max) = node.max_length {
        predicate = Some(and(predicate, Predicate::MaxLength(max)));
    }
    if let Some(pattern) = &node.pattern {
        let regex = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        predicate = Some(and(predicate, Predicate::Pattern(regex)));
    }
    if let Some(name) = &node.format {
        let format = cx.formats().get(name)?;
        predicate = Some(and(predicate, Predicate::Format(format)));
    }
    Ok(refine(TypeDescriptor::Primitive(Primitive::String), predicate))
}

pub(crate) fn number(schema: &Value, _cx: &Transformer<'_>) -> Result<TypeDescriptor> {
    if let Some(enumerated) = enumeration(schema)? {
        return Ok(enumerated);
    }

    let node: NumericKeywords = keywords(schema)?;
    let mut predicate = numeric_bounds(&node);
    // Only the number kind honors the flag; the integer base type is whole already.
    if node.integer == Some(true) {
        predicate = Some(and(predicate, Predicate::WholeNumber));
    }
    Ok(refine(TypeDescriptor::Primitive(Primitive::Number), predicate))
}

pub(crate) fn integer(schema: &Value, _cx: &Transformer<'_>) -> Result<TypeDescriptor> {
    if let Some(enumerated) = enumeration(schema)? {
        return Ok(enumerated);
    }

    let node: NumericKeywords = keywords(schema)?;
    Ok(refine(
        TypeDescriptor::Primitive(Primitive::Integer),
        numeric_bounds(&node),
    ))
}

pub(crate) fn boolean(_schema: &Value, _cx: &Transformer<'_>) -> Result<TypeDescriptor> {
    Ok(TypeDescriptor::Primitive(Primitive::Boolean))
}

pub(crate) fn object(schema: &Value, cx: &Transformer<'_>) -> Result<TypeDescriptor> {
    let node: ObjectKeywords = keywords(schema)?;
    let Some(properties) = node.properties.as_ref().filter(|p| !p.is_empty()) else {
        return Ok(TypeDescriptor::Primitive(Primitive::Object));
    };

    let fields = properties
        .iter()
        .map(|(name, schema)| {
            let ty = cx.transform(schema)?;
            // Booleans always resolve to a concrete value, never to absence.
            let optional =
                !node.is_required(name) && ty != TypeDescriptor::Primitive(Primitive::Boolean);
            Ok(Field {
                name: name.clone(),
                ty,
                optional,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TypeDescriptor::Record(Record {
        name: node.description.clone(),
        fields,
    }))
}

pub(crate) fn array(schema: &Value, cx: &Transformer<'_>) -> Result<TypeDescriptor> {
    let node: ArrayKeywords = keywords(schema)?;
    let base = match &node.items {
        None => TypeDescriptor::Primitive(Primitive::Array),
        Some(items @ Value::Object(_)) => TypeDescriptor::List(Box::new(cx.transform(items)?)),
        Some(Value::Array(items)) => TypeDescriptor::Tuple(
            items
                .iter()
                .map(|item| cx.transform(item))
                .collect::<Result<Vec<_>>>()?,
        ),
        Some(other) => return Err(SchemaError::UnsupportedSchema(other.clone())),
    };

    let mut predicate = None;
    if let Some(min) = node.min_items {
        predicate = Some(and(predicate, Predicate::MinLength(min)));
    }
    if let Some(max) = node.max_items {
        predicate = Some(and(predicate, Predicate::MaxLength(max)));
    }
    if node.unique_items == Some(true) {
        predicate = Some(and(predicate, Predicate::UniqueItems));
    }
    Ok(refine(base, predicate))
}

pub(crate) fn null(_schema: &Value, _cx: &Transformer<'_>) -> Result<TypeDescriptor> {
    Ok(TypeDescriptor::Primitive(Primitive::Null))
}

/// Builds the enumerated type for a node carrying `enum`, if any.
fn enumeration(schema: &Value) -> Result<Option<TypeDescriptor>> {
    let node: EnumKeywords = keywords(schema)?;
    let Some(values) = &node.enum_values else {
        return Ok(None);
    };

    let Some(names) = &node.enum_names else {
        return Ok(Some(TypeDescriptor::Enumerated(Enumeration::of(values.clone()))));
    };
    if names.len() != values.len() {
        return Err(SchemaError::EnumLengthMismatch {
            values: values.len(),
            names: names.len(),
        });
    }

    let entries = values
        .iter()
        .zip(names)
        .map(|(value, label)| EnumEntry {
            value: value.clone(),
            label: Some(label.clone()),
        })
        .collect();
    Ok(Some(TypeDescriptor::Enumerated(Enumeration { entries })))
}

fn numeric_bounds(node: &NumericKeywords) -> Option<Predicate> {
    let mut predicate = None;
    if let Some(min) = node.minimum {
        let bound = if node.exclusive_minimum == Some(true) {
            Predicate::GreaterThan(min)
        } else {
            Predicate::GreaterOrEqual(min)
        };
        predicate = Some(and(predicate, bound));
    }
    if let Some(max) = node.maximum {
        let bound = if node.exclusive_maximum == Some(true) {
            Predicate::LessThan(max)
        } else {
            Predicate::LessOrEqual(max)
        };
        predicate = Some(and(predicate, bound));
    }
    predicate
}

fn refine(base: TypeDescriptor, predicate: Option<Predicate>) -> TypeDescriptor {
    match predicate {
        Some(predicate) => TypeDescriptor::refined(base, predicate),
        None => base,
    }
}
