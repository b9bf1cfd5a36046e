//! Rendering the active configuration for frontend build tooling.

use std::str::FromStr;

use crate::config::loader::ConfigError;
use crate::config::schema::EnvironmentConfig;

/// Output format for [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    Json,
    /// An `environment.ts` module exporting `environment`.
    #[default]
    TypeScript,
}

impl FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(RenderFormat::Json),
            "ts" | "typescript" => Ok(RenderFormat::TypeScript),
            other => Err(format!("unknown format {other:?} (expected json or ts)")),
        }
    }
}

pub fn render(config: &EnvironmentConfig, format: RenderFormat) -> Result<String, ConfigError> {
    match format {
        RenderFormat::Json => {
            let mut out = serde_json::to_string_pretty(config)?;
            out.push('\n');
            Ok(out)
        }
        RenderFormat::TypeScript => render_typescript(config),
    }
}

fn render_typescript(config: &EnvironmentConfig) -> Result<String, ConfigError> {
    let auth0 = config.auth0();
    Ok(format!(
        "export const environment = {{\n  \
           production: {},\n  \
           apiServerUrl: {},\n  \
           auth0: {{\n    \
             url: {},\n    \
             audience: {},\n    \
             clientId: {},\n    \
             callbackURL: {},\n  \
           }}\n\
         }};\n",
        config.production(),
        literal(config.api_server_url())?,
        literal(auth0.url())?,
        literal(auth0.audience())?,
        literal(auth0.client_id())?,
        literal(auth0.callback_url())?,
    ))
}

// JSON string literals are valid TypeScript string literals.
fn literal(value: &str) -> Result<String, ConfigError> {
    Ok(serde_json::to_string(value)?)
}
