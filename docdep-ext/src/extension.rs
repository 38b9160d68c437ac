//! Extension trait.

use docdep_config::ConfigValue;
use docdep_core::BuildEnvironment;
use eyre::Result;

use crate::Event;

/// What an extension reports about itself when registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionMetadata {
    /// Extension version.
    pub version: &'static str,
    /// Safe to use when the host reads documents in parallel.
    pub parallel_read_safe: bool,
    /// Safe to use when the host writes output in parallel.
    pub parallel_write_safe: bool,
}

impl Default for ExtensionMetadata {
    fn default() -> Self {
        Self {
            version: "unknown",
            parallel_read_safe: false,
            parallel_write_safe: false,
        }
    }
}

/// An extension that hooks into the host's build lifecycle.
///
/// Hooks are only called for the events listed in
/// [`subscriptions`](Extension::subscriptions).
///
/// # Example
///
/// ```ignore
/// struct DocCounter;
///
/// impl Extension for DocCounter {
///     fn name(&self) -> &'static str { "doc-counter" }
///
///     fn subscriptions(&self) -> &'static [Event] { &[Event::EnvUpdated] }
///
///     fn on_env_updated(&self, env: &dyn BuildEnvironment) -> Result<()> {
///         println!("{} documents", env.found_docs().count());
///         Ok(())
///     }
/// }
/// ```
pub trait Extension: Send + Sync {
    /// The name of this extension (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Version and parallel safety of this extension.
    fn metadata(&self) -> ExtensionMetadata {
        ExtensionMetadata::default()
    }

    /// Config values this extension reads.
    fn config_values(&self) -> Vec<ConfigValue> {
        Vec::new()
    }

    /// Events this extension wants to receive.
    fn subscriptions(&self) -> &'static [Event] {
        &[]
    }

    /// Called once the build environment is final.
    ///
    /// # Errors
    ///
    /// Return an error to fail the build.
    #[allow(unused_variables)]
    fn on_env_updated(&self, env: &dyn BuildEnvironment) -> Result<()> {
        Ok(())
    }
}
