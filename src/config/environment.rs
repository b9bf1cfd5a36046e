//! Deployment environments and their built-in presets.

use std::fmt;
use std::str::FromStr;

use figment::providers::{Data, Format, Toml};

use crate::config::loader::ConfigError;

/// Environment variable naming the active environment.
pub const ENVIRONMENT_VAR: &str = "APP_ENV";

const DEVELOPMENT_PRESET: &str = include_str!("../../environments/development.toml");
const PRODUCTION_PRESET: &str = include_str!("../../environments/production.toml");

/// A deployment target with its own configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const ALL: [Environment; 2] = [Environment::Development, Environment::Production];

    pub fn name(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    /// Read the environment from `APP_ENV`, defaulting to development when unset.
    ///
    /// A variable that is set is always honoured, so an empty `APP_ENV` is
    /// an unknown environment rather than the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(ENVIRONMENT_VAR) {
            Ok(value) => value.parse(),
            Err(_) => Ok(Environment::default()),
        }
    }

    /// Values compiled into the binary for this environment.
    pub fn preset(self) -> Data<Toml> {
        let source = match self {
            Environment::Development => DEVELOPMENT_PRESET,
            Environment::Production => PRODUCTION_PRESET,
        };
        Toml::string(source)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::UnknownEnvironment(s.to_string())),
        }
    }
}
