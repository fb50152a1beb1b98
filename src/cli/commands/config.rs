//! Implementation of the `turnwatch config` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::display::detail_table;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

#[derive(Args, Debug)]
pub struct ConfigArgs {}

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    #[serde(flatten)]
    pub config: Config,
}

impl CommandOutput for ConfigOutput {
    fn to_human(&self) -> String {
        let monitor = &self.config.monitor;
        let logging = &self.config.logging;
        detail_table([
            ("monitor.timeout_ms", monitor.timeout_ms.to_string()),
            ("monitor.stability_window_ms", monitor.stability_window_ms.to_string()),
            ("monitor.poll_interval_ms", monitor.poll_interval_ms.to_string()),
            ("monitor.auto_continue", monitor.auto_continue.to_string()),
            (
                "monitor.max_continuation_attempts",
                monitor.max_continuation_attempts.to_string(),
            ),
            (
                "monitor.continuation_settle_ms",
                monitor.continuation_settle_ms.to_string(),
            ),
            ("logging.level", logging.level.clone()),
            ("logging.format", logging.format.clone()),
            (
                "logging.log_dir",
                logging.log_dir.clone().unwrap_or_else(|| "-".to_string()),
            ),
            ("logging.rotation", logging.rotation.clone()),
        ])
        .to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[allow(clippy::unused_async)]
pub async fn execute(_args: ConfigArgs, config: Config, json_mode: bool) -> Result<()> {
    output(&ConfigOutput { config }, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_output_is_flat_config() {
        let value = ConfigOutput {
            config: Config::default(),
        }
        .to_json();
        assert_eq!(value["monitor"]["max_continuation_attempts"], 1);
        assert_eq!(value["logging"]["level"], "info");
    }

    #[test]
    fn test_human_output_lists_monitor_options() {
        let rendered = ConfigOutput {
            config: Config::default(),
        }
        .to_human();
        assert!(rendered.contains("monitor.poll_interval_ms"));
        assert!(rendered.contains("500"));
    }
}
