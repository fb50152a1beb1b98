//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::config::ConfigArgs;
use super::commands::replay::ReplayArgs;

#[derive(Parser)]
#[command(name = "turnwatch")]
#[command(about = "Turnwatch - completion monitor for externally generated turns", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .turnwatch/config.yaml and .turnwatch/local.yaml)
    #[arg(short, long, global = true, env = "TURNWATCH_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a scripted session through the completion monitor
    Replay(ReplayArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}
