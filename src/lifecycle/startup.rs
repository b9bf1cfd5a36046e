//! Startup orchestration.

use std::path::PathBuf;

use crate::config::{ConfigError, ConfigProvider, ConfigSource, Environment, EnvironmentConfig};

/// Explicit choices that take precedence over the process environment.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    /// Overrides `APP_ENV`.
    pub environment: Option<Environment>,
    /// Overrides `APP_CONFIG_FILE`.
    pub config_file: Option<PathBuf>,
}

impl StartupOptions {
    /// Build the source these options describe, filling gaps from the environment.
    pub fn source(&self) -> Result<ConfigSource, ConfigError> {
        let environment = match self.environment {
            Some(environment) => environment,
            None => Environment::from_env()?,
        };

        let mut source = ConfigSource::from_env(environment);
        if let Some(path) = &self.config_file {
            source = source.with_file(path.clone());
        }
        Ok(source)
    }
}

/// Load `source` into `provider`, logging every problem on failure.
pub fn startup<'a>(
    source: &ConfigSource,
    provider: &'a ConfigProvider,
) -> Result<&'a EnvironmentConfig, ConfigError> {
    tracing::info!(
        environment = %source.environment,
        file = ?source.file,
        "Loading configuration"
    );

    provider.load(source).inspect_err(|e| {
        if let ConfigError::Validation(errors) = e {
            for error in errors {
                tracing::error!(field = error.field(), "{}", error);
            }
        } else {
            tracing::error!("{}", e);
        }
    })
}
