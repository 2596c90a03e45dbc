//! YAML configuration for format registries.
//!
//! A config names the built-in formats to enable and declares extra formats
//! as regular expressions.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! builtins:
//!   - email
//!   - date-time
//! patterns:
//!   zip-code: "^[0-9]{5}$"
//!   sku: "^[A-Z]{3}-[0-9]+$"
//! ```

use std::collections::BTreeMap;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use regex::Regex;
use schema_types_core::{FormatRegistry, register_formats};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::builtin::builtin;
use crate::error::{FormatsError, Result};

type Check = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Format registry configuration.
///
/// # Examples
///
/// ```
/// use schema_types_formats::FormatsConfig;
///
/// let config: FormatsConfig = serde_yaml::from_str(r#"
/// version: "1.0"
/// builtins: [email]
/// patterns:
///   zip-code: "^[0-9]{5}$"
/// "#).unwrap();
///
/// let registry = config.build_registry().unwrap();
/// assert_eq!(registry.names(), vec!["email", "zip-code"]);
/// assert!(registry.get("zip-code").unwrap().check("12345"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatsConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    /// Built-in formats to register (empty = none).
    #[serde(default)]
    pub builtins: Vec<String>,
    /// Extra formats: name → regular expression a value must match.
    #[serde(default)]
    pub patterns: BTreeMap<String, String>,
}

impl FormatsConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](FormatsError::IoError) if the file cannot be read,
    /// or [`YamlError`](FormatsError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        info!(
            path = %path.display(),
            builtins = config.builtins.len(),
            patterns = config.patterns.len(),
            "loaded formats config"
        );
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](FormatsError::IoError) if the file cannot be
    /// written, or [`YamlError`](FormatsError::YamlError) if serialization
    /// fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Registers the configured formats in `registry`.
    ///
    /// Built-ins are registered first, then pattern formats in name order.
    /// Every entry is checked before anything is registered, including name
    /// clashes with `registry` and within the config, so a failing config
    /// leaves `registry` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownBuiltin`](FormatsError::UnknownBuiltin),
    /// [`InvalidPattern`](FormatsError::InvalidPattern), or the core
    /// `DuplicateFormat` error if a name is already registered.
    pub fn apply(&self, registry: &mut FormatRegistry) -> Result<()> {
        registry.register_all(self.checks()?)?;
        info!(formats = registry.len(), "applied formats config");
        Ok(())
    }

    /// Returns a fresh registry holding the configured formats.
    ///
    /// # Errors
    ///
    /// Same as [`apply`](Self::apply).
    pub fn build_registry(&self) -> Result<FormatRegistry> {
        let mut registry = FormatRegistry::new();
        self.apply(&mut registry)?;
        Ok(registry)
    }

    /// Registers the configured formats in the process-wide registry.
    ///
    /// The batch is registered under one write lock and, like
    /// [`apply`](Self::apply), either entirely or not at all.
    ///
    /// # Errors
    ///
    /// Same as [`apply`](Self::apply).
    pub fn register_globally(&self) -> Result<()> {
        register_formats(self.checks()?)?;
        info!("registered formats config globally");
        Ok(())
    }

    fn checks(&self) -> Result<Vec<(String, Check)>> {
        let mut checks: Vec<(String, Check)> = Vec::new();
        for name in &self.builtins {
            let check = builtin(name).ok_or_else(|| FormatsError::UnknownBuiltin(name.clone()))?;
            let check: Check = Box::new(check);
            checks.push((name.clone(), check));
        }
        for (name, pattern) in &self.patterns {
            let regex = Regex::new(pattern).map_err(|source| FormatsError::InvalidPattern {
                name: name.clone(),
                source,
            })?;
            let check: Check = Box::new(move |s: &str| regex.is_match(s));
            checks.push((name.clone(), check));
        }
        Ok(checks)
    }
}
