//! Agents Locate API server

use anyhow::Context;
use clap::Parser;
use locate_core::{init_logging, AgentMode, AppConfig, LogFormat};
use locate_web::LocateServer;
use std::path::PathBuf;
use tracing::info;

/// Agents Locate API - ingest GitHub repositories and chat about them
#[derive(Parser, Debug)]
#[command(name = "locate-web")]
#[command(about = "HTTP server for the Agents Locate API")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "LOCATE_CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Server host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Server port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Agent implementation (pending, simulated)
    #[arg(long)]
    agent_mode: Option<AgentMode>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (compact, pretty, json)
    #[arg(long)]
    log_format: Option<LogFormat>,
}

impl Args {
    /// Command line flags win over every other configuration source.
    fn apply(self, config: &mut AppConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(mode) = self.agent_mode {
            config.agents.mode = mode;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config =
        AppConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    args.apply(&mut config);
    config.validate().context("invalid configuration")?;

    init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    info!(
        address = %config.server.address(),
        agent_mode = %config.agents.mode,
        "Starting Agents Locate API"
    );

    LocateServer::from_config(&config)
        .start()
        .await
        .context("server failed")?;

    Ok(())
}
