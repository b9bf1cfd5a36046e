//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in preset (environment.rs)
//!     → optional config file, TOML or JSON (loader.rs)
//!     → APP_* overrides (loader.rs)
//!     → figment merge + extract into RawEnvironmentConfig
//!     → validation.rs (presence and URL checks)
//!     → EnvironmentConfig (validated, immutable)
//!     → provider.rs installs it once for the whole process
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - Layers merge key by key through figment, later layers win
//! - Validation separates syntactic (serde) from semantic checks

pub mod environment;
pub mod loader;
pub mod provider;
pub mod render;
pub mod schema;
pub mod validation;

pub use environment::Environment;
pub use loader::{development_endpoints, env_overrides, load_config, ConfigError, ConfigSource, EndpointIssue};
pub use provider::ConfigProvider;
pub use render::{render, RenderFormat};
pub use schema::{Auth0Config, EnvironmentConfig, RawEnvironmentConfig};
pub use validation::ValidationError;
