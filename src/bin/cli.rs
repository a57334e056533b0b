//! dealscout CLI
//!
//! Runs the local feed proxy and checks configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dealscout::{error::Result, models::Config, server};

/// Configuration file read when `--config` is not given.
const DEFAULT_CONFIG: &str = "dealscout.toml";

/// dealscout - Restaurant deal browser
#[derive(Parser, Debug)]
#[command(name = "dealscout", version, about = "Restaurant deal browser and feed proxy")]
struct Cli {
    /// Path to the TOML configuration file [default: dealscout.toml]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the upstream feed on /api/restaurants
    Serve {
        /// Listen address (overrides server.bind)
        #[arg(long)]
        bind: Option<String>,

        /// Upstream feed URL (overrides upstream.url)
        #[arg(long)]
        upstream: Option<String>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging from the verbosity flag and configured level.
fn init_logging(verbose: bool, configured: &str) {
    let level = if verbose { "debug" } else { configured };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // An explicit path, or a validate run, must point at a readable file.
    let required = cli.config.is_some() || matches!(cli.command, Command::Validate);
    let path = cli.config.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let loaded = if required {
        Config::load(&path).map(Some)
    } else {
        Config::load_optional(&path)
    };

    let level = match &loaded {
        Ok(Some(config)) => config.logging.level.as_str(),
        _ => "info",
    };
    init_logging(cli.verbose, level);

    let mut config = match loaded {
        Ok(Some(config)) => {
            log::info!("Loaded configuration from {}", path.display());
            config
        }
        Ok(None) => {
            log::warn!("No configuration at {}. Using defaults.", path.display());
            Config::default()
        }
        Err(e) => {
            log::error!("Failed to load configuration from {}: {}", path.display(), e);
            return Err(e);
        }
    };

    match cli.command {
        Command::Serve { bind, upstream } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            if let Some(url) = upstream {
                config.upstream.url = url;
            }

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }

            log::info!("Relaying {}", config.upstream.url);
            let state = server::ProxyState::from_config(&config)?;
            server::serve(state, config.server.bind_addr()?).await?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK (upstream {})", config.upstream.url);
        }
    }

    Ok(())
}
