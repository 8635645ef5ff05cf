//! quorumctl - operator CLI for the proposal orchestration core
//!
//! Offline tools over index snapshots:
//! - Derive the current status of a proposal
//! - Rebuild its timeline
//! - Check whether an operation is allowed
//! - Dry-run a full operation lifecycle against scripted clients

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

use commands::{gate, history, simulate, status};
use config::{LoggingConfig, QuorumConfig};

/// quorumctl application
#[derive(Parser)]
#[command(name = "quorumctl")]
#[command(about = "Quorum - DAO proposal orchestration CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "QUORUM_CONFIG")]
    config: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    output: output::OutputFormat,

    /// Log level, overriding the configured one
    #[arg(long, env = "QUORUM_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "QUORUM_LOG_JSON")]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Derive the status of a proposal
    Status(status::StatusArgs),

    /// Rebuild the timeline of a proposal
    History(history::HistoryArgs),

    /// Check whether an operation is allowed
    Gate(gate::GateArgs),

    /// Dry-run a cancellation lifecycle
    #[command(alias = "sim")]
    Simulate(simulate::SimulateArgs),
}

fn init_tracing(logging: &LoggingConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.level.clone().into());
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(env_filter);
    if logging.json {
        registry.with(layer.json()).init();
    } else if logging.timestamps {
        registry.with(layer).init();
    } else {
        registry.with(layer.without_time()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = QuorumConfig::load(cli.config.as_deref())
        .with_context(|| format!("loading configuration from {:?}", cli.config))?;

    // Override with CLI args
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json {
        config.logging.json = true;
    }

    init_tracing(&config.logging);

    let format = cli.output;
    match cli.command {
        Commands::Status(args) => status::execute(args, &config, format)?,
        Commands::History(args) => history::execute(args, &config, format)?,
        Commands::Gate(args) => gate::execute(args, &config, format)?,
        Commands::Simulate(args) => simulate::execute(args, &config, format).await?,
    }

    Ok(())
}
