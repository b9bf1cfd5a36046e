//! Environment configuration provider for the coffee shop frontend.
//!
//! Loads the API base URL and Auth0 settings for one deployment environment,
//! validates them, and exposes the result as process-wide read-only state.

pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::provider::{active, install};
pub use config::schema::{Auth0Config, EnvironmentConfig};
pub use config::{ConfigError, ConfigProvider, ConfigSource, Environment};
