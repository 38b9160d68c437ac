//! Declared configuration values.

use std::fmt;

/// What the host has to rebuild when a config value changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rebuild {
    /// The whole build environment is invalidated.
    Env,
    /// Nothing needs rebuilding.
    None,
}

impl fmt::Display for Rebuild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rebuild::Env => write!(f, "env"),
            Rebuild::None => write!(f, "none"),
        }
    }
}

/// A configuration value declared by an extension.
///
/// A `default` of `None` means the value stays unset until the config file
/// provides one.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValue {
    pub name: &'static str,
    pub default: Option<toml::Value>,
    pub rebuild: Rebuild,
}

impl ConfigValue {
    /// Declare a value with no default.
    pub fn unset(name: &'static str, rebuild: Rebuild) -> Self {
        Self {
            name,
            default: None,
            rebuild,
        }
    }

    /// Declare a value with a default.
    pub fn with_default(name: &'static str, default: toml::Value, rebuild: Rebuild) -> Self {
        Self {
            name,
            default: Some(default),
            rebuild,
        }
    }
}

/// Convert a TOML value to its string representation
pub fn value_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}
