//! Process-wide access to the active configuration.
//!
//! The configuration is installed once at startup and read-only afterwards.
//! There is no way back to the unloaded state and no way to swap the value.

use std::sync::OnceLock;

use crate::config::loader::{load_config, ConfigError, ConfigSource};
use crate::config::schema::EnvironmentConfig;

static GLOBAL: ConfigProvider = ConfigProvider::new();

/// Holder for a single, write-once `EnvironmentConfig`.
#[derive(Debug, Default)]
pub struct ConfigProvider {
    slot: OnceLock<EnvironmentConfig>,
}

impl ConfigProvider {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// The provider backing [`active`] and [`install`].
    pub fn global() -> &'static ConfigProvider {
        &GLOBAL
    }

    /// Install `config` as the active configuration.
    ///
    /// The first install wins. Installing an equal value again returns the
    /// active one; installing a different value fails with `AlreadyLoaded`.
    pub fn install(&self, config: EnvironmentConfig) -> Result<&EnvironmentConfig, ConfigError> {
        match self.slot.set(config) {
            Ok(()) => {
                let active = self.active()?;
                tracing::info!(
                    production = active.production(),
                    api_server_url = %active.api_server_url(),
                    auth0_domain = %active.auth0().domain(),
                    "Configuration loaded"
                );
                Ok(active)
            }
            Err(rejected) => {
                let active = self.active()?;
                if *active == rejected {
                    Ok(active)
                } else {
                    tracing::error!("Refusing to replace the active configuration");
                    Err(ConfigError::AlreadyLoaded)
                }
            }
        }
    }

    /// Load from `source`, validate and install.
    pub fn load(&self, source: &ConfigSource) -> Result<&EnvironmentConfig, ConfigError> {
        let config = load_config(source)?;
        self.install(config)
    }

    /// The active configuration.
    pub fn active(&self) -> Result<&EnvironmentConfig, ConfigError> {
        self.slot.get().ok_or(ConfigError::NotLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }
}

/// The process-wide active configuration.
pub fn active() -> Result<&'static EnvironmentConfig, ConfigError> {
    GLOBAL.active()
}

/// Install the process-wide configuration. See [`ConfigProvider::install`].
pub fn install(config: EnvironmentConfig) -> Result<&'static EnvironmentConfig, ConfigError> {
    GLOBAL.install(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::Environment;
    use std::io::Write;

    #[test]
    fn test_not_loaded_before_install() {
        let provider = ConfigProvider::new();
        assert!(!provider.is_loaded());
        assert!(matches!(provider.active(), Err(ConfigError::NotLoaded)));
    }

    #[test]
    fn test_load_then_access() {
        let provider = ConfigProvider::new();
        let loaded = provider
            .load(&ConfigSource::new(Environment::Development))
            .unwrap()
            .clone();

        let first = provider.active().unwrap();
        let second = provider.active().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(*first, loaded);
    }

    #[test]
    fn test_reinstall_equal_is_idempotent() {
        let provider = ConfigProvider::new();
        let source = ConfigSource::new(Environment::Development);
        let first = provider.load(&source).unwrap() as *const EnvironmentConfig;
        let second = provider.load(&source).unwrap() as *const EnvironmentConfig;
        assert_eq!(first, second);
    }

    #[test]
    fn test_conflicting_install_rejected() {
        let provider = ConfigProvider::new();
        provider.load(&ConfigSource::new(Environment::Development)).unwrap();

        let other = ConfigSource::new(Environment::Production);
        assert!(matches!(provider.load(&other), Err(ConfigError::AlreadyLoaded)));
        assert_eq!(
            provider.active().unwrap().auth0().client_id(),
            "X5bU0An6GS9epNRHN7OUSayz1QhklFBv"
        );
    }

    #[test]
    fn test_failed_load_leaves_provider_empty() {
        let provider = ConfigProvider::new();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, r#"apiServerUrl = "nope""#).unwrap();
        let broken = ConfigSource::new(Environment::Development).with_file(file.path());

        assert!(matches!(provider.load(&broken), Err(ConfigError::Validation(_))));
        assert!(!provider.is_loaded());
    }
}
