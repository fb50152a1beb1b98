//! Turnwatch CLI entry point.

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use turnwatch::cli::{handle_error, load_config, Cli, Commands};
use turnwatch::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };

    let _logger = match LogConfig::try_from(&config.logging)
        .context("Invalid logging configuration")
        .and_then(|log_config| LoggerImpl::init(&log_config))
    {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling");
            on_interrupt.cancel();
        }
    });

    let result = match cli.command {
        Commands::Replay(args) => {
            turnwatch::cli::commands::replay::execute(args, config.monitor, cancel, cli.json).await
        }
        Commands::Config(args) => {
            turnwatch::cli::commands::config::execute(args, config, cli.json).await
        }
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
