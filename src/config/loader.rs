//! Configuration loading from presets, disk and the process environment.
//!
//! Layers are merged with figment in increasing precedence: the built-in
//! preset, an optional TOML or JSON file, then `APP_*` variables. A variable
//! that is set is always applied, even when empty.

use std::fs;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Json, Toml};
use figment::Figment;
use thiserror::Error;
use url::Url;

use crate::config::environment::Environment;
use crate::config::schema::{EnvironmentConfig, RawEnvironmentConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Prefix shared by every override variable.
pub const ENV_PREFIX: &str = "APP_";

/// Environment variable pointing at an optional config file.
pub const CONFIG_FILE_VAR: &str = "APP_CONFIG_FILE";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Extract(#[from] figment::Error),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("unknown environment {0:?} (expected development or production)")]
    UnknownEnvironment(String),

    #[error("configuration has not been loaded")]
    NotLoaded,

    #[error("a different configuration is already active")]
    AlreadyLoaded,

    #[error("invalid URL {value:?}: {source}")]
    Url {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Wire key for an override variable name with the prefix stripped.
fn override_key(name: &str) -> Option<&'static str> {
    match name.to_ascii_uppercase().as_str() {
        "PRODUCTION" => Some("production"),
        "API_SERVER_URL" => Some("apiServerUrl"),
        "AUTH0_URL" => Some("auth0.url"),
        "AUTH0_AUDIENCE" => Some("auth0.audience"),
        "AUTH0_CLIENT_ID" => Some("auth0.clientId"),
        "AUTH0_CALLBACK_URL" => Some("auth0.callbackURL"),
        _ => None,
    }
}

/// Provider for the `APP_*` field overrides.
///
/// `APP_API_SERVER_URL` maps to `apiServerUrl`, `APP_AUTH0_CLIENT_ID` to
/// `auth0.clientId`, and so on. Other `APP_*` variables are ignored.
pub fn env_overrides() -> Env {
    Env::prefixed(ENV_PREFIX)
        .filter_map(|key| override_key(key.as_str()).map(Into::into))
        .lowercase(false)
}

/// Where a configuration comes from: a preset, an optional file, overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSource {
    pub environment: Environment,
    pub file: Option<PathBuf>,
    /// Apply `APP_*` variables from the process environment.
    pub env_overrides: bool,
}

impl ConfigSource {
    /// Preset values only. Nothing is read from the process environment.
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            file: None,
            env_overrides: false,
        }
    }

    /// Preset plus `APP_CONFIG_FILE` and `APP_*` overrides from the process environment.
    pub fn from_env(environment: Environment) -> Self {
        Self {
            environment,
            file: std::env::var_os(CONFIG_FILE_VAR).map(PathBuf::from),
            env_overrides: true,
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// The merged, not yet extracted, layers.
    pub fn figment(&self) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(self.environment.preset());

        if let Some(path) = &self.file {
            // figment treats a missing file as empty; a named file must exist.
            fs::metadata(path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            figment = if is_json(path) {
                figment.merge(Json::file(path))
            } else {
                figment.merge(Toml::file(path))
            };
        }

        if self.env_overrides {
            figment = figment.merge(env_overrides());
        }

        Ok(figment)
    }

    /// Merge every layer without validating.
    pub fn resolve(&self) -> Result<RawEnvironmentConfig, ConfigError> {
        Ok(self.figment()?.extract()?)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load and validate configuration from every layer of `source`.
pub fn load_config(source: &ConfigSource) -> Result<EnvironmentConfig, ConfigError> {
    let raw = source.resolve()?;
    let config = validate_config(raw).map_err(ConfigError::Validation)?;

    tracing::debug!(
        environment = %source.environment,
        file = ?source.file,
        env_overrides = source.env_overrides,
        "Configuration resolved"
    );

    for (field, issue) in development_endpoints(&config) {
        tracing::warn!(field, %issue, "Production configuration points at a development endpoint");
    }

    Ok(config)
}

/// Why a production endpoint looks like it belongs to a development setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointIssue {
    Loopback,
    PlainHttp,
}

impl std::fmt::Display for EndpointIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointIssue::Loopback => f.write_str("loopback host"),
            EndpointIssue::PlainHttp => f.write_str("plain http"),
        }
    }
}

/// URL fields of a production config that point at loopback hosts or use
/// plain `http`. Always empty for non-production configs.
pub fn development_endpoints(config: &EnvironmentConfig) -> Vec<(&'static str, EndpointIssue)> {
    if !config.production() {
        return Vec::new();
    }

    let endpoints = [
        ("apiServerUrl", config.api_server_url()),
        ("auth0.audience", config.auth0().audience()),
        ("auth0.callbackURL", config.auth0().callback_url()),
    ];

    endpoints
        .into_iter()
        .filter_map(|(field, value)| {
            let url = Url::parse(value).ok()?;
            if is_loopback(&url) {
                Some((field, EndpointIssue::Loopback))
            } else if url.scheme() == "http" {
                Some((field, EndpointIssue::PlainHttp))
            } else {
                None
            }
        })
        .collect()
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}
