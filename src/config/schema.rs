//! Configuration schema definitions.
//!
//! Two shapes live here. The raw types mirror the persisted layout with every
//! field optional so that a missing key is caught by validation rather than
//! by the deserializer. The frozen types are what the rest of the application
//! sees: every field present, read-only accessors.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::loader::ConfigError;

/// Suffix appended to the tenant prefix to form the Auth0 domain.
pub const AUTH0_DOMAIN_SUFFIX: &str = "auth0.com";

/// Validated configuration for one deployment environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    production: bool,
    api_server_url: String,
    auth0: Auth0Config,
}

/// Identity provider settings consumed by the frontend auth module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Auth0Config {
    url: String,
    audience: String,
    client_id: String,
    #[serde(rename = "callbackURL")]
    callback_url: String,
}

impl EnvironmentConfig {
    pub(crate) fn new(production: bool, api_server_url: String, auth0: Auth0Config) -> Self {
        Self {
            production,
            api_server_url,
            auth0,
        }
    }

    /// Whether this is a production build.
    pub fn production(&self) -> bool {
        self.production
    }

    /// Base URL of the backend API as configured, minus surrounding whitespace.
    pub fn api_server_url(&self) -> &str {
        &self.api_server_url
    }

    pub fn auth0(&self) -> &Auth0Config {
        &self.auth0
    }

    /// Resolve a path relative to the API base URL.
    ///
    /// Segments of `path` are appended to the base path; a query or
    /// fragment on the base stays where it is.
    pub fn api_endpoint(&self, path: &str) -> Result<Url, ConfigError> {
        let mut endpoint = parse_url(self.api_server_url.clone())?;
        endpoint
            .path_segments_mut()
            .map_err(|()| ConfigError::Url {
                value: self.api_server_url.clone(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            })?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(endpoint)
    }
}

impl Auth0Config {
    pub(crate) fn new(url: String, audience: String, client_id: String, callback_url: String) -> Self {
        Self {
            url,
            audience,
            client_id,
            callback_url,
        }
    }

    /// Tenant domain prefix (e.g. `dev-w83e009q.us`).
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    /// Full tenant domain, e.g. `dev-w83e009q.us.auth0.com`.
    pub fn domain(&self) -> String {
        format!("{}.{}", self.url, AUTH0_DOMAIN_SUFFIX)
    }

    /// Token issuer as it appears in the `iss` claim.
    pub fn issuer(&self) -> Result<Url, ConfigError> {
        parse_url(format!("https://{}/", self.domain()))
    }

    /// Location of the tenant's public signing keys.
    pub fn jwks_url(&self) -> Result<Url, ConfigError> {
        parse_url(format!("https://{}/.well-known/jwks.json", self.domain()))
    }

    /// Login link for the implicit flow used by the frontend.
    pub fn authorize_url(&self) -> Result<Url, ConfigError> {
        let base = format!("https://{}/authorize", self.domain());
        Url::parse_with_params(
            &base,
            &[
                ("audience", self.audience.as_str()),
                ("response_type", "token"),
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.callback_url.as_str()),
            ],
        )
        .map_err(|source| ConfigError::Url { value: base, source })
    }
}

fn parse_url(value: String) -> Result<Url, ConfigError> {
    Url::parse(&value).map_err(|source| ConfigError::Url { value, source })
}

/// Unvalidated configuration layer. Every field is optional.
///
/// Keys are the wire names; layers are merged by figment before extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawEnvironmentConfig {
    pub production: Option<bool>,
    pub api_server_url: Option<String>,
    pub auth0: RawAuth0Config,
}

/// Unvalidated identity provider layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawAuth0Config {
    pub url: Option<String>,
    pub audience: Option<String>,
    pub client_id: Option<String>,
    #[serde(rename = "callbackURL")]
    pub callback_url: Option<String>,
}
