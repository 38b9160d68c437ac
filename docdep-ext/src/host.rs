//! Extension host.

use std::path::{Path, PathBuf};

use docdep_config::{Config, ConfigValue};
use docdep_core::BuildEnvironment;
use eyre::Result;
use tracing::debug;

use crate::{Event, Extension};

/// Owns the build configuration and dispatches lifecycle events.
///
/// Registering an extension applies the defaults of the config values it
/// declares. Events are delivered to extensions in registration order; the
/// first hook error stops dispatch and is returned as-is.
///
/// Hooks always see the host's configuration through
/// [`BuildEnvironment::config`], whatever config the environment carries.
///
/// # Example
///
/// ```ignore
/// let host = Host::new(config).extension(DepfileExtension::new());
/// host.env_updated(&env)?;
/// ```
pub struct Host {
    config: Config,
    config_values: Vec<ConfigValue>,
    extensions: Vec<Box<dyn Extension>>,
}

impl Host {
    /// Create a host with no extensions.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            config_values: Vec::new(),
            extensions: Vec::new(),
        }
    }

    /// Register an extension.
    pub fn extension(mut self, extension: impl Extension + 'static) -> Self {
        for value in extension.config_values() {
            self.config.register(&value);
            self.config_values.push(value);
        }
        debug!(
            "registered extension '{}' ({:?})",
            extension.name(),
            extension.metadata()
        );
        self.extensions.push(Box::new(extension));
        self
    }

    /// Configuration with all declared defaults applied.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Config values declared by registered extensions.
    pub fn config_values(&self) -> &[ConfigValue] {
        &self.config_values
    }

    /// Registered extensions in registration order.
    pub fn extensions(&self) -> impl Iterator<Item = &dyn Extension> {
        self.extensions.iter().map(|ext| ext.as_ref())
    }

    /// Whether every extension tolerates a parallel read phase.
    pub fn is_parallel_read_safe(&self) -> bool {
        self.extensions
            .iter()
            .all(|ext| ext.metadata().parallel_read_safe)
    }

    /// Whether every extension tolerates a parallel write phase.
    pub fn is_parallel_write_safe(&self) -> bool {
        self.extensions
            .iter()
            .all(|ext| ext.metadata().parallel_write_safe)
    }

    /// Emit [`Event::EnvUpdated`] to subscribed extensions.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by an extension hook.
    pub fn env_updated(&self, env: &dyn BuildEnvironment) -> Result<()> {
        let env = HostEnvironment {
            env,
            config: &self.config,
        };
        for ext in self.subscribers(Event::EnvUpdated) {
            debug!("{}: {}", Event::EnvUpdated, ext.name());
            ext.on_env_updated(&env)?;
        }
        Ok(())
    }

    fn subscribers(&self, event: Event) -> impl Iterator<Item = &dyn Extension> {
        self.extensions()
            .filter(move |ext| ext.subscriptions().contains(&event))
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// A build environment answering `config()` with the host's configuration.
struct HostEnvironment<'a> {
    env: &'a dyn BuildEnvironment,
    config: &'a Config,
}

impl BuildEnvironment for HostEnvironment<'_> {
    fn srcdir(&self) -> &Path {
        self.env.srcdir()
    }

    fn outdir(&self) -> &Path {
        self.env.outdir()
    }

    fn found_docs(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        self.env.found_docs()
    }

    fn doc2path(&self, docname: &str) -> PathBuf {
        self.env.doc2path(docname)
    }

    fn dependencies(&self, docname: &str) -> Box<dyn Iterator<Item = &Path> + '_> {
        self.env.dependencies(docname)
    }

    fn config(&self) -> &Config {
        self.config
    }
}
