//! Configuration for docdep hosts and extensions.
//!
//! Configuration lives in a flat `docdep.toml` table. Extensions declare
//! the values they read as [`ConfigValue`]s; the host registers them on a
//! [`Config`] so declared defaults apply when the file is silent.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod value;

pub use config::Config;
pub use error::{Error, Result, SourceContext};
pub use value::{ConfigValue, Rebuild, value_to_string};
