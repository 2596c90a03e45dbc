//! Constraint predicates attached to refined types.
//!
//! Each schema constraint (`minLength`, `minimum`, `uniqueItems`, ...) maps to
//! one [`Predicate`] variant. Constructors fold the constraints present on a
//! schema node into a single predicate with [`and`], so a node with zero
//! constraints needs no special case: the fold simply never starts.
//!
//! # Examples
//!
//! ```
//! use schema_types_core::{Predicate, and};
//! use serde_json::json;
//!
//! let mut predicate = None;
//! predicate = Some(and(predicate, Predicate::MinLength(2)));
//! predicate = Some(and(predicate, Predicate::MaxLength(3)));
//! let predicate = predicate.unwrap();
//!
//! assert!(predicate.test(&json!("ab")));
//! assert!(!predicate.test(&json!("a")));
//! assert!(!predicate.test(&json!("abcd")));
//! assert_eq!(predicate.to_string(), "and(minLength(2), maxLength(3))");
//! ```

use std::fmt;

use regex::Regex;
use serde_json::Value;

use crate::format::Format;

/// A boolean check over a JSON value.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Length (string characters or array elements) is at least `n`.
    MinLength(usize),
    /// Length (string characters or array elements) is at most `n`.
    MaxLength(usize),
    /// String contains a match for the regex anywhere.
    Pattern(Regex),
    /// Number is strictly greater than the bound.
    GreaterThan(f64),
    /// Number is greater than or equal to the bound.
    GreaterOrEqual(f64),
    /// Number is strictly less than the bound.
    LessThan(f64),
    /// Number is less than or equal to the bound.
    LessOrEqual(f64),
    /// Number has no fractional part.
    WholeNumber,
    /// Array elements are pairwise distinct.
    UniqueItems,
    /// String satisfies a registered format.
    Format(Format),
    /// Both predicates hold, left one checked first.
    And(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    /// Returns `true` if `value` satisfies the predicate.
    ///
    /// Values of a type the predicate does not apply to (e.g. a number
    /// passed to [`MinLength`](Predicate::MinLength)) fail.
    pub fn test(&self, value: &Value) -> bool {
        match self {
            Self::MinLength(min) => length(value).is_some_and(|len| len >= *min),
            Self::MaxLength(max) => length(value).is_some_and(|len| len <= *max),
            Self::Pattern(regex) => value.as_str().is_some_and(|s| regex.is_match(s)),
            Self::GreaterThan(bound) => value.as_f64().is_some_and(|n| n > *bound),
            Self::GreaterOrEqual(bound) => value.as_f64().is_some_and(|n| n >= *bound),
            Self::LessThan(bound) => value.as_f64().is_some_and(|n| n < *bound),
            Self::LessOrEqual(bound) => value.as_f64().is_some_and(|n| n <= *bound),
            Self::WholeNumber => is_whole_number(value),
            Self::UniqueItems => value.as_array().is_some_and(|items| all_distinct(items)),
            Self::Format(format) => value.as_str().is_some_and(|s| format.check(s)),
            Self::And(f, g) => f.test(value) && g.test(value),
        }
    }

    /// Returns the constraint name used in displays (`"minLength"`, `"and"`, ...).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MinLength(_) => "minLength",
            Self::MaxLength(_) => "maxLength",
            Self::Pattern(_) => "regexp",
            Self::GreaterThan(_) => "gt",
            Self::GreaterOrEqual(_) => "gte",
            Self::LessThan(_) => "lt",
            Self::LessOrEqual(_) => "lte",
            Self::WholeNumber => "isInteger",
            Self::UniqueItems => "uniqueItems",
            Self::Format(_) => "format",
            Self::And(_, _) => "and",
        }
    }
}

/// Composes an optional accumulated predicate `f` with `g`.
///
/// Returns `g` alone when `f` is absent; otherwise a predicate requiring
/// `f` and then `g`.
pub fn and(f: Option<Predicate>, g: Predicate) -> Predicate {
    match f {
        Some(f) => Predicate::And(Box::new(f), Box::new(g)),
        None => g,
    }
}

/// Returns `true` if `value` is a number with no fractional part.
pub fn is_whole_number(value: &Value) -> bool {
    if value.is_i64() || value.is_u64() {
        return true;
    }
    value.as_f64().is_some_and(|n| n.is_finite() && n.fract() == 0.0)
}

fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

fn all_distinct(items: &[Value]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(i, a)| items[i + 1..].iter().all(|b| a != b))
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MinLength(a), Self::MinLength(b)) | (Self::MaxLength(a), Self::MaxLength(b)) => {
                a == b
            }
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            (Self::GreaterThan(a), Self::GreaterThan(b))
            | (Self::GreaterOrEqual(a), Self::GreaterOrEqual(b))
            | (Self::LessThan(a), Self::LessThan(b))
            | (Self::LessOrEqual(a), Self::LessOrEqual(b)) => a == b,
            (Self::WholeNumber, Self::WholeNumber) | (Self::UniqueItems, Self::UniqueItems) => true,
            (Self::Format(a), Self::Format(b)) => a == b,
            (Self::And(f1, g1), Self::And(f2, g2)) => f1 == f2 && g1 == g2,
            _ => false,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinLength(n) | Self::MaxLength(n) => write!(f, "{}({n})", self.kind()),
            Self::Pattern(regex) => write!(f, "regexp(/{}/)", regex.as_str()),
            Self::GreaterThan(n)
            | Self::GreaterOrEqual(n)
            | Self::LessThan(n)
            | Self::LessOrEqual(n) => write!(f, "{}({n})", self.kind()),
            Self::WholeNumber | Self::UniqueItems => f.write_str(self.kind()),
            Self::Format(format) => write!(f, "format({})", format.name()),
            Self::And(a, b) => write!(f, "and({a}, {b})"),
        }
    }
}
