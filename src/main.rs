//! `env-config`: check and render the frontend environment configuration.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;

use env_config::config::{render, Environment, RenderFormat};
use env_config::lifecycle::{startup, StartupOptions};
use env_config::observability::logging::init_logging;
use env_config::ConfigProvider;

#[derive(Parser)]
#[command(name = "env-config")]
#[command(about = "Load, validate and render the frontend environment configuration", long_about = None)]
struct Cli {
    /// Environment to load (development, production).
    #[arg(short, long, env = "APP_ENV", value_parser = parse_environment)]
    environment: Option<Environment>,

    /// Config file layered over the built-in preset (TOML or JSON).
    #[arg(short, long, env = "APP_CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and exit
    Check,
    /// Print the configuration and derived Auth0 endpoints as JSON
    Show,
    /// Write the frontend environment module
    Render {
        /// Output format (ts, json)
        #[arg(short, long, default_value = "ts")]
        format: RenderFormat,

        /// Destination file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_environment(value: &str) -> Result<Environment, String> {
    value.parse().map_err(|e: env_config::ConfigError| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = StartupOptions {
        environment: cli.environment,
        config_file: cli.config,
    };
    let source = options.source()?;
    let config = startup(&source, ConfigProvider::global())?;

    match cli.command {
        Commands::Check => {
            tracing::info!(production = config.production(), "Configuration is valid");
        }
        Commands::Show => {
            let auth0 = config.auth0();
            let report = json!({
                "environment": config,
                "derived": {
                    "auth0Domain": auth0.domain(),
                    "issuer": auth0.issuer()?.as_str(),
                    "jwksUrl": auth0.jwks_url()?.as_str(),
                    "loginUrl": auth0.authorize_url()?.as_str(),
                },
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Render { format, output } => {
            let rendered = render(config, format)?;
            match output {
                Some(path) => {
                    fs::write(&path, rendered)?;
                    tracing::info!(path = %path.display(), "Environment module written");
                }
                None => print!("{}", rendered),
            }
        }
    }

    Ok(())
}
