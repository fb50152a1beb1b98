//! Command-line interface for Turnwatch.

pub mod commands;
pub mod display;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use std::path::Path;

/// Load configuration from an explicit file, or the project-local hierarchy.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Report a command failure and exit with a non-zero status.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        let payload = serde_json::json!({
            "success": false,
            "error": err.to_string(),
            "causes": chain.get(1..).unwrap_or_default(),
        });
        println!("{}", serde_json::to_string_pretty(&payload).unwrap_or_default());
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }
    std::process::exit(1);
}
