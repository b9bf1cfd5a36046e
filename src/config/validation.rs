//! Configuration validation.
//!
//! # Responsibilities
//! - Turn a layered `RawEnvironmentConfig` into a frozen `EnvironmentConfig`
//! - Reject absent or blank values, strip surrounding whitespace from the rest
//! - Check that URL-typed fields parse as absolute URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RawEnvironmentConfig → Result<EnvironmentConfig, Vec<ValidationError>>
//! - Nothing is returned on failure, so a partial config never escapes

use thiserror::Error;
use url::Url;

use crate::config::schema::{Auth0Config, EnvironmentConfig, RawEnvironmentConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required key is absent or holds only whitespace.
    #[error("configuration missing: `{field}` is required")]
    ConfigurationMissing { field: &'static str },

    /// A URL-typed key holds something that is not an absolute URL.
    #[error("invalid URL for `{field}`: {value:?} ({source})")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
}

impl ValidationError {
    /// Wire name of the offending key.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::ConfigurationMissing { field } => field,
            ValidationError::InvalidUrl { field, .. } => field,
        }
    }
}

/// Validate a raw configuration and freeze it.
pub fn validate_config(raw: RawEnvironmentConfig) -> Result<EnvironmentConfig, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let production = raw.production;
    if production.is_none() {
        errors.push(ValidationError::ConfigurationMissing { field: "production" });
    }

    let api_server_url = required_url("apiServerUrl", raw.api_server_url, &mut errors);
    let url = required("auth0.url", raw.auth0.url, &mut errors);
    let audience = required_url("auth0.audience", raw.auth0.audience, &mut errors);
    let client_id = required("auth0.clientId", raw.auth0.client_id, &mut errors);
    let callback_url = required_url("auth0.callbackURL", raw.auth0.callback_url, &mut errors);

    match (production, api_server_url, url, audience, client_id, callback_url) {
        (Some(production), Some(api), Some(url), Some(audience), Some(client_id), Some(callback))
            if errors.is_empty() =>
        {
            Ok(EnvironmentConfig::new(
                production,
                api,
                Auth0Config::new(url, audience, client_id, callback),
            ))
        }
        _ => Err(errors),
    }
}

fn required(
    field: &'static str,
    value: Option<String>,
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => {
            errors.push(ValidationError::ConfigurationMissing { field });
            None
        }
    }
}

fn required_url(
    field: &'static str,
    value: Option<String>,
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    let value = required(field, value, errors)?;
    match check_url(&value) {
        Ok(()) => Some(value),
        Err(source) => {
            errors.push(ValidationError::InvalidUrl { field, value, source });
            None
        }
    }
}

// `Url::parse` accepts things like `mailto:x`; a base URL must be able to carry paths.
fn check_url(value: &str) -> Result<(), url::ParseError> {
    let parsed = Url::parse(value)?;
    if parsed.cannot_be_a_base() {
        return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> RawEnvironmentConfig {
        toml::from_str(
            r#"
            production = false
            apiServerUrl = "http://127.0.0.1:5000"
            [auth0]
            url = "dev-w83e009q.us"
            audience = "https://localhost:5000"
            clientId = "X5bU0An6GS9epNRHN7OUSayz1QhklFBv"
            callbackURL = "http://localhost:8100"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_complete_config_is_accepted_unmodified() {
        let config = validate_config(complete()).unwrap();
        assert!(!config.production());
        assert_eq!(config.api_server_url(), "http://127.0.0.1:5000");
        assert_eq!(config.auth0().callback_url(), "http://localhost:8100");
    }

    #[test]
    fn test_missing_client_id() {
        let mut raw = complete();
        raw.auth0.client_id = None;

        let errors = validate_config(raw).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::ConfigurationMissing { field: "auth0.clientId" }]
        );
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut raw = complete();
        raw.auth0.url = Some("   ".into());

        let errors = validate_config(raw).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field(), "auth0.url");
    }

    #[test]
    fn test_surrounding_whitespace_is_stripped() {
        let mut raw = complete();
        raw.api_server_url = Some("  http://127.0.0.1:5000  ".into());
        raw.auth0.client_id = Some("\tX5bU0An6GS9epNRHN7OUSayz1QhklFBv\n".into());

        let config = validate_config(raw).unwrap();
        assert_eq!(config.api_server_url(), "http://127.0.0.1:5000");
        assert_eq!(config.auth0().client_id(), "X5bU0An6GS9epNRHN7OUSayz1QhklFBv");
    }

    #[test]
    fn test_missing_production_flag() {
        let mut raw = complete();
        raw.production = None;

        let errors = validate_config(raw).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::ConfigurationMissing { field: "production" }]
        );
    }

    #[test]
    fn test_invalid_url() {
        let mut raw = complete();
        raw.api_server_url = Some("127.0.0.1:5000/api".into());

        let errors = validate_config(raw).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ValidationError::InvalidUrl { field: "apiServerUrl", .. }
        ));
    }

    #[test]
    fn test_cannot_be_base_url_rejected() {
        let mut raw = complete();
        raw.auth0.callback_url = Some("mailto:someone@example.com".into());

        let errors = validate_config(raw).unwrap_err();
        assert_eq!(errors[0].field(), "auth0.callbackURL");
    }

    #[test]
    fn test_reports_all_errors() {
        let raw = RawEnvironmentConfig {
            api_server_url: Some("not a url".into()),
            ..Default::default()
        };

        let errors = validate_config(raw).unwrap_err();
        let fields: Vec<_> = errors.iter().map(ValidationError::field).collect();
        assert_eq!(
            fields,
            vec![
                "production",
                "apiServerUrl",
                "auth0.url",
                "auth0.audience",
                "auth0.clientId",
                "auth0.callbackURL",
            ]
        );
        assert!(matches!(errors[1], ValidationError::InvalidUrl { .. }));
    }
}
