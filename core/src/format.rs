//! Named string formats referenced by the `format` keyword.
//!
//! A [`FormatRegistry`] maps format names (e.g. `"email"`) to predicates.
//! Registries can be built and passed around explicitly (see
//! [`Transformer`](crate::Transformer)), and one process-wide registry backs
//! the free functions [`register_format`], [`reset_formats`] and
//! [`transform`](crate::transform).
//!
//! The process-wide registry starts empty and only changes through explicit
//! registration or a full reset. Formats are meant to be registered once at
//! startup and read during many transformations; ordering between writers
//! and readers is up to the caller.
//!
//! # Examples
//!
//! ```
//! use schema_types_core::FormatRegistry;
//!
//! let mut registry = FormatRegistry::new();
//! registry.register("lowercase", |s| s.chars().all(|c| !c.is_uppercase())).unwrap();
//!
//! let format = registry.get("lowercase").unwrap();
//! assert!(format.check("abc"));
//! assert!(!format.check("Abc"));
//! assert!(registry.register("lowercase", |_| true).is_err());
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use tracing::debug;

use crate::error::{Result, SchemaError};

/// Predicate signature for a format check.
pub type FormatFn = dyn Fn(&str) -> bool + Send + Sync;

/// A named format predicate.
///
/// Cloning is cheap; clones share the same function. Two formats are equal
/// when they have the same name and share the same function.
#[derive(Clone)]
pub struct Format {
    name: Arc<str>,
    check: Arc<FormatFn>,
}

impl Format {
    /// Creates a format from a name and predicate.
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            check: Arc::new(check),
        }
    }

    /// Returns the format name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the predicate against `value`.
    pub fn check(&self, value: &str) -> bool {
        (self.check)(value)
    }
}

impl fmt::Debug for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Format").field("name", &self.name).finish_non_exhaustive()
    }
}

impl PartialEq for Format {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.check, &other.check)
    }
}

/// A mapping from format name to predicate.
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    formats: HashMap<String, Format>,
}

impl FormatRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `check` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateFormat`](SchemaError::DuplicateFormat) if `name` is
    /// already registered. The existing entry is left untouched.
    pub fn register<F>(&mut self, name: impl Into<String>, check: F) -> Result<()>
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        if self.formats.contains_key(&name) {
            return Err(SchemaError::DuplicateFormat(name));
        }
        debug!(format = %name, "registering format");
        self.formats.insert(name.clone(), Format::new(name, check));
        Ok(())
    }

    /// Registers every `(name, check)` pair, or none of them.
    ///
    /// All names are checked against the registry and against each other
    /// before the first insertion.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateFormat`](SchemaError::DuplicateFormat) for the first
    /// name that is already registered or repeated within `formats`; the
    /// registry is left unchanged.
    pub fn register_all<I, F>(&mut self, formats: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, F)>,
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let formats: Vec<(String, F)> = formats.into_iter().collect();
        let mut seen = HashSet::with_capacity(formats.len());
        for (name, _) in &formats {
            if self.formats.contains_key(name) || !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateFormat(name.clone()));
            }
        }
        debug!(count = formats.len(), "registering formats");
        for (name, check) in formats {
            self.formats.insert(name.clone(), Format::new(name, check));
        }
        Ok(())
    }

    /// Removes every registered format.
    pub fn reset(&mut self) {
        debug!(count = self.formats.len(), "resetting formats");
        self.formats.clear();
    }

    /// Looks up a format by name.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownFormat`](SchemaError::UnknownFormat) carrying `name`
    /// when nothing is registered under it.
    pub fn get(&self, name: &str) -> Result<Format> {
        self.formats
            .get(name)
            .cloned()
            .ok_or_else(|| SchemaError::UnknownFormat(name.to_string()))
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Returns the number of registered formats.
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Returns `true` if no formats are registered.
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Returns registered format names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.formats.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

static GLOBAL_FORMATS: LazyLock<RwLock<FormatRegistry>> =
    LazyLock::new(|| RwLock::new(FormatRegistry::new()));

/// Registers a format in the process-wide registry.
///
/// # Errors
///
/// Returns [`DuplicateFormat`](SchemaError::DuplicateFormat) if `name` is
/// already registered.
pub fn register_format<F>(name: impl Into<String>, check: F) -> Result<()>
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    GLOBAL_FORMATS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(name, check)
}

/// Registers a batch of formats in the process-wide registry, all or none.
///
/// The write lock is held for the whole batch, so no reader observes a
/// partially registered batch.
///
/// # Errors
///
/// Same as [`FormatRegistry::register_all`].
pub fn register_formats<I, F>(formats: I) -> Result<()>
where
    I: IntoIterator<Item = (String, F)>,
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    GLOBAL_FORMATS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register_all(formats)
}

/// Clears the process-wide registry.
pub fn reset_formats() {
    GLOBAL_FORMATS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .reset();
}

/// Runs `f` with read access to the process-wide registry.
///
/// The read lock is held while `f` runs. Calling [`register_format`],
/// [`register_formats`] or [`reset_formats`] from inside `f` deadlocks; copy
/// out what you need (e.g. `formats.clone()`) and mutate afterwards.
pub fn with_global_formats<T>(f: impl FnOnce(&FormatRegistry) -> T) -> T {
    let registry = GLOBAL_FORMATS.read().unwrap_or_else(PoisonError::into_inner);
    f(&registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = FormatRegistry::new();
        registry.register("digits", |s| s.chars().all(|c| c.is_ascii_digit())).unwrap();

        assert!(registry.contains("digits"));
        assert_eq!(registry.len(), 1);
        let format = registry.get("digits").unwrap();
        assert_eq!(format.name(), "digits");
        assert!(format.check("123"));
        assert!(!format.check("12a"));
    }

    #[test]
    fn test_duplicate_registration_keeps_original() {
        let mut registry = FormatRegistry::new();
        registry.register("flag", |s| s == "on").unwrap();

        let err = registry.register("flag", |_| true).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateFormat(ref name) if name == "flag"));
        assert!(!registry.get("flag").unwrap().check("off"));
    }

    #[test]
    fn test_unknown_format_carries_name() {
        let registry = FormatRegistry::new();
        let err = registry.get("email").unwrap_err();
        assert!(matches!(err, SchemaError::UnknownFormat(ref name) if name == "email"));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut registry = FormatRegistry::new();
        registry.register("a", |_| true).unwrap();
        registry.register("b", |_| true).unwrap();
        registry.reset();

        assert!(registry.is_empty());
        registry.register("a", |_| false).unwrap();
        assert_eq!(registry.names(), vec!["a"]);
    }

    #[test]
    fn test_format_equality_uses_function_identity() {
        let a = Format::new("x", |_| true);
        let b = Format::new("x", |_| true);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    type Check = fn(&str) -> bool;

    #[test]
    fn test_register_all_inserts_every_format() {
        let batch: [(String, Check); 2] = [
            ("upper".into(), |s| s.chars().all(char::is_uppercase)),
            ("lower".into(), |s| s.chars().all(char::is_lowercase)),
        ];
        let mut registry = FormatRegistry::new();
        registry.register_all(batch).unwrap();
        assert_eq!(registry.names(), vec!["lower", "upper"]);
        assert!(registry.get("upper").unwrap().check("AB"));
    }

    #[test]
    fn test_register_all_is_all_or_nothing() {
        let mut registry = FormatRegistry::new();
        registry.register("uuid", |_| true).unwrap();
        let before = registry.get("uuid").unwrap();

        let batch: [(String, Check); 2] = [("email".into(), |_| true), ("uuid".into(), |_| false)];
        let err = registry.register_all(batch).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateFormat(ref name) if name == "uuid"));
        assert_eq!(registry.names(), vec!["uuid"]);
        assert_eq!(registry.get("uuid").unwrap(), before);
    }

    #[test]
    fn test_register_all_rejects_repeats_within_batch() {
        let batch: [(String, Check); 3] = [
            ("hex".into(), |_| true),
            ("oct".into(), |_| true),
            ("hex".into(), |_| false),
        ];
        let mut registry = FormatRegistry::new();
        let err = registry.register_all(batch).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateFormat(ref name) if name == "hex"));
        assert!(registry.is_empty());
    }
}
