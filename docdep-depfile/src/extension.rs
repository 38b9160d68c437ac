use std::sync::{Arc, Mutex, PoisonError};

use docdep_config::{ConfigValue, Rebuild};
use docdep_core::BuildEnvironment;
use docdep_ext::{Event, Extension, ExtensionMetadata, Host};
use eyre::Result;

use crate::{WriteOutcome, write_depfile};

/// Extension version reported to the host.
pub const VERSION: &str = "1.0";

/// Config value holding the depfile path.
pub const DEPFILE_CONFIG: &str = "depfile";

/// Writes a depfile whenever the host finalizes its build environment.
///
/// Clones share the outcome of the last write, so a caller can keep a clone
/// after handing one to the host.
#[derive(Debug, Clone, Default)]
pub struct DepfileExtension {
    last: Arc<Mutex<Option<WriteOutcome>>>,
}

impl DepfileExtension {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome of the most recent `EnvUpdated`, if one was handled.
    pub fn last_outcome(&self) -> Option<WriteOutcome> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Extension for DepfileExtension {
    fn name(&self) -> &'static str {
        "depfile"
    }

    fn metadata(&self) -> ExtensionMetadata {
        ExtensionMetadata {
            version: VERSION,
            parallel_read_safe: true,
            parallel_write_safe: true,
        }
    }

    fn config_values(&self) -> Vec<ConfigValue> {
        vec![ConfigValue::unset(DEPFILE_CONFIG, Rebuild::Env)]
    }

    fn subscriptions(&self) -> &'static [Event] {
        &[Event::EnvUpdated]
    }

    fn on_env_updated(&self, env: &dyn BuildEnvironment) -> Result<()> {
        let outcome = write_depfile(env)?;
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(outcome);
        Ok(())
    }
}

/// Register the depfile extension on a host.
pub fn setup(host: Host) -> Host {
    host.extension(DepfileExtension::new())
}

#[cfg(test)]
mod tests {
    use docdep_config::Config;
    use docdep_core::Environment;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_metadata() {
        let metadata = DepfileExtension::new().metadata();
        assert_eq!(metadata.version, "1.0");
        assert!(metadata.parallel_read_safe);
        assert!(metadata.parallel_write_safe);
    }

    #[test]
    fn test_subscribes_to_env_updated_only() {
        assert_eq!(
            DepfileExtension::new().subscriptions(),
            &[Event::EnvUpdated]
        );
    }

    #[test]
    fn test_setup_declares_depfile_without_default() {
        let host = setup(Host::default());

        assert_eq!(
            host.config_values(),
            &[ConfigValue::unset(DEPFILE_CONFIG, Rebuild::Env)]
        );
        assert!(host.config().get(DEPFILE_CONFIG).is_none());
        assert!(host.is_parallel_read_safe());
        assert!(host.is_parallel_write_safe());
    }

    #[test]
    fn test_last_outcome_is_shared_with_clones() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("html.d");
        let mut config = Config::new();
        config.set(DEPFILE_CONFIG, path.display().to_string());
        let ext = DepfileExtension::new();
        let host = Host::new(config).extension(ext.clone());

        let env = Environment::new("/docs", "/build/html").document("index");

        assert_eq!(ext.last_outcome(), None);
        host.env_updated(&env).unwrap();

        assert_eq!(
            ext.last_outcome(),
            Some(WriteOutcome::Written { path, inputs: 1 })
        );
    }

    #[test]
    fn test_last_outcome_records_disabled() {
        let ext = DepfileExtension::new();
        let host = Host::default().extension(ext.clone());

        host.env_updated(&Environment::new("/docs", "/build/html")).unwrap();

        assert_eq!(ext.last_outcome(), Some(WriteOutcome::Disabled));
    }
}
