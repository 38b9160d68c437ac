//! Host configuration values.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use tracing::warn;

use crate::{ConfigValue, Error, Result};

/// Configuration values read from `docdep.toml`.
///
/// The file is a flat table. Keys declared by extensions through
/// [`Config::register`] get their default when the file leaves them out;
/// anything else is kept as-is and ignored by the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    values: toml::Table,
}

impl Config {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse configuration from a string with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let values: toml::Table =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        Ok(Self { values })
    }

    /// Declare a value, filling in its default when not already set.
    pub fn register(&mut self, value: &ConfigValue) {
        if self.values.contains_key(value.name) {
            return;
        }
        if let Some(default) = &value.default {
            self.values.insert(value.name.to_string(), default.clone());
        }
    }

    /// Get a raw value.
    pub fn get(&self, name: &str) -> Option<&toml::Value> {
        self.values.get(name)
    }

    /// Set a value, replacing any previous one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<toml::Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Get a value as a path.
    ///
    /// Returns `None` when the value is missing, empty, or not a string.
    pub fn path(&self, name: &str) -> Option<PathBuf> {
        match self.values.get(name)? {
            toml::Value::String(s) if s.is_empty() => None,
            toml::Value::String(s) => Some(PathBuf::from(s)),
            other => {
                warn!(
                    "config value '{}' should be a path, found {}; ignoring it",
                    name,
                    other.type_str()
                );
                None
            }
        }
    }
}

impl FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "docdep.toml")
    }
}
