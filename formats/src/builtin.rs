//! Built-in string format checks.
//!
//! The checks are deliberately loose: they recognize the common shape of
//! each format rather than every corner of the governing RFC.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use schema_types_core::FormatRegistry;

use crate::error::{FormatsError, Result};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex must compile"));
static URI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:\S+$").expect("static regex must compile"));
static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("static regex must compile")
});

/// Built-in formats, by name.
pub const BUILTIN_FORMATS: &[(&str, fn(&str) -> bool)] = &[
    ("email", is_email),
    ("uri", is_uri),
    ("date", is_date),
    ("date-time", is_date_time),
    ("ipv4", is_ipv4),
    ("ipv6", is_ipv6),
    ("uuid", is_uuid),
    ("hostname", is_hostname),
];

/// Returns the names of all built-in formats.
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTIN_FORMATS.iter().map(|(name, _)| *name)
}

/// Returns the check registered for a built-in format.
pub fn builtin(name: &str) -> Option<fn(&str) -> bool> {
    BUILTIN_FORMATS
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, check)| *check)
}

/// Registers one built-in format in `registry`.
///
/// # Errors
///
/// Returns [`UnknownBuiltin`](FormatsError::UnknownBuiltin) for an unknown
/// name, or the core `DuplicateFormat` error if it is already registered.
pub fn register_builtin(registry: &mut FormatRegistry, name: &str) -> Result<()> {
    let check = builtin(name).ok_or_else(|| FormatsError::UnknownBuiltin(name.to_string()))?;
    registry.register(name, check)?;
    Ok(())
}

/// Registers every built-in format in `registry`.
///
/// # Errors
///
/// Fails with the core `DuplicateFormat` error if any built-in name is
/// already registered.
pub fn register_builtin_formats(registry: &mut FormatRegistry) -> Result<()> {
    for name in builtin_names() {
        register_builtin(registry, name)?;
    }
    Ok(())
}

/// Returns a fresh registry holding every built-in format.
///
/// # Examples
///
/// ```
/// use schema_types_core::Transformer;
/// use schema_types_formats::builtin_registry;
/// use serde_json::json;
///
/// let formats = builtin_registry().unwrap();
/// let ty = Transformer::new(&formats)
///     .transform(&json!({ "type": "string", "format": "date" }))
///     .unwrap();
/// assert!(ty.accepts(&json!("2024-02-29")));
/// assert!(!ty.accepts(&json!("2023-02-29")));
/// ```
pub fn builtin_registry() -> Result<FormatRegistry> {
    let mut registry = FormatRegistry::new();
    register_builtin_formats(&mut registry)?;
    Ok(registry)
}

fn is_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

fn is_uri(s: &str) -> bool {
    URI_RE.is_match(s)
}

fn is_date(s: &str) -> bool {
    s.len() == 10 && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn is_date_time(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
}

fn is_ipv4(s: &str) -> bool {
    s.parse::<Ipv4Addr>().is_ok()
}

fn is_ipv6(s: &str) -> bool {
    s.parse::<Ipv6Addr>().is_ok()
}

fn is_uuid(s: &str) -> bool {
    UUID_RE.is_match(s)
}

/// RFC 1123 host names: dot-separated labels of 1-63 alphanumerics or
/// hyphens, no leading or trailing hyphen, 253 characters overall.
fn is_hostname(s: &str) -> bool {
    let s = s.strip_suffix('.').unwrap_or(s);
    !s.is_empty()
        && s.len() <= 253
        && s.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}
