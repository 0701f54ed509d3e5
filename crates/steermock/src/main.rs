//! Steermock daemon - rule-driven relay for a contract-mock backend

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use steermock::SteerError;
use steermock::config::Config;
use steermock::error::Result;
use steermock::relay::RelayServer;

/// Steermock - steers a contract-mock backend from request-body rules
#[derive(Parser)]
#[command(name = "steermock")]
#[command(about = "A rule-driven HTTP relay that steers a contract-mock backend")]
#[command(version)]
pub struct Cli {
    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the relay server (default command)
    #[command(name = "serve")]
    Serve,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        None | Some(Command::Serve) => serve(cli.config).await,
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,steermock=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    if let Some(path) = config_path {
        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(&path).map_err(|e| {
            SteerError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| SteerError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    } else {
        let default_paths = [
            dirs::home_dir().map(|h| h.join(".steermock").join("config.toml")),
            dirs::config_dir().map(|c| c.join("steermock").join("config.toml")),
            Some(PathBuf::from("config.toml")),
        ];

        for path_opt in default_paths.iter().flatten() {
            if path_opt.exists() {
                tracing::info!("Loading config from: {}", path_opt.display());
                let content = std::fs::read_to_string(path_opt).map_err(|e| {
                    SteerError::Config(format!(
                        "Failed to read config file {}: {}",
                        path_opt.display(),
                        e
                    ))
                })?;
                let config: Config = toml::from_str(&content)
                    .map_err(|e| SteerError::Config(format!("Failed to parse config: {e}")))?;
                return Ok(config);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }
}

async fn serve(config_path: Option<PathBuf>) -> Result<()> {
    tracing::info!("Starting steermock");

    let config = load_config(config_path)?;
    tracing::debug!("Config loaded: {:?}", config);

    let relay = RelayServer::new(config.relay);
    relay.serve().await?;

    tracing::info!("Steermock stopped");
    Ok(())
}
