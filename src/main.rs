mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;
use vitrine_core::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let mut config = Config::load_or_default(cli.config.as_deref());

            // CLI flags win over the config file.
            config.server.host = host;
            config.server.port = port;

            tracing::info!("Starting vitrine server");
            vitrine_server::start(config).await?;
        }
        Commands::Check => {
            let config = Config::load_or_default(cli.config.as_deref());
            let warnings = config.validate();
            if warnings.is_empty() {
                println!("Configuration OK");
            } else {
                for warning in &warnings {
                    println!("warning: {warning}");
                }
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
