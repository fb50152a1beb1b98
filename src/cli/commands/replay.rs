//! Implementation of the `turnwatch replay` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::adapters::scripted::{ScriptedSession, SessionScript};
use crate::cli::display::{colorize_result, detail_table};
use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::{MonitorConfig, MonitorReport};
use crate::services::CompletionMonitor;

const PREVIEW_CHARS: usize = 240;

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Session script (YAML or JSON)
    pub script: PathBuf,

    /// Override the overall deadline
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Override the poll interval
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Override the stability window
    #[arg(long)]
    pub stability_window_ms: Option<u64>,

    /// Override the continuation retry budget
    #[arg(long)]
    pub max_continuation_attempts: Option<u32>,

    /// Surface truncation instead of resuming it
    #[arg(long)]
    pub no_auto_continue: bool,

    /// Minimum length of the extracted final text
    #[arg(long, default_value = "1")]
    pub min_len: usize,
}

impl ReplayArgs {
    fn apply(&self, mut config: MonitorConfig) -> Result<MonitorConfig> {
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        if let Some(poll_interval_ms) = self.poll_interval_ms {
            config.poll_interval_ms = poll_interval_ms;
        }
        if let Some(stability_window_ms) = self.stability_window_ms {
            config.stability_window_ms = stability_window_ms;
        }
        if let Some(attempts) = self.max_continuation_attempts {
            config.max_continuation_attempts = attempts;
        }
        if self.no_auto_continue {
            config.auto_continue = false;
        }
        config.validate().context("Invalid monitor options")?;
        Ok(config)
    }
}

#[derive(Debug, Serialize)]
pub struct ReplayOutput {
    pub script: PathBuf,
    pub config: MonitorConfig,
    pub report: MonitorReport,
    pub dispatch_calls: u32,
    pub final_text: Option<String>,
}

impl CommandOutput for ReplayOutput {
    fn to_human(&self) -> String {
        let report = &self.report;
        let table = detail_table([
            ("Result", colorize_result(report.result).to_string()),
            ("Elapsed", format!("{} ms", report.elapsed_ms)),
            ("Polls", report.polls.to_string()),
            ("Snapshots", report.snapshots_observed.to_string()),
            (
                "First activity",
                if report.first_activity_seen { "seen" } else { "not seen" }.to_string(),
            ),
            (
                "Continuations",
                format!(
                    "{} of {}",
                    report.continuation_attempts, self.config.max_continuation_attempts
                ),
            ),
            (
                "Final length",
                report
                    .final_text_length
                    .map_or_else(|| "-".to_string(), |length| length.to_string()),
            ),
        ]);

        let mut lines = vec![
            format!("Replayed {}", self.script.display()),
            table.to_string(),
        ];
        if let Some(ref text) = self.final_text {
            lines.push(String::new());
            lines.push(truncate(text, PREVIEW_CHARS));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(
    args: ReplayArgs,
    base: MonitorConfig,
    cancel: CancellationToken,
    json_mode: bool,
) -> Result<()> {
    let config = args.apply(base)?;
    let script = SessionScript::load(&args.script)
        .with_context(|| format!("Failed to load session script {}", args.script.display()))?;

    info!(
        script = %args.script.display(),
        frames = script.frames.len(),
        "Replaying session script"
    );

    let session = Arc::new(ScriptedSession::new(script));
    let mut monitor = CompletionMonitor::new(session.clone(), session.clone(), session.clone());

    let report = monitor
        .watch(&config, &cancel)
        .await
        .context("Replay interrupted")?;

    let final_text = if report.result.is_complete() {
        monitor.extract_final_text(args.min_len).await
    } else {
        None
    };

    let output_data = ReplayOutput {
        script: args.script,
        config,
        report,
        dispatch_calls: session.dispatch_calls(),
        final_text,
    };
    output(&output_data, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ReplayArgs {
        ReplayArgs {
            script: PathBuf::from("session.yaml"),
            timeout_ms: None,
            poll_interval_ms: None,
            stability_window_ms: None,
            max_continuation_attempts: None,
            no_auto_continue: false,
            min_len: 1,
        }
    }

    #[test]
    fn test_overrides_apply_on_top_of_config() {
        let args = ReplayArgs {
            timeout_ms: Some(5000),
            poll_interval_ms: Some(100),
            no_auto_continue: true,
            ..args()
        };
        let config = args.apply(MonitorConfig::default()).expect("valid overrides");
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.poll_interval_ms, 100);
        assert!(!config.auto_continue);
        assert_eq!(config.stability_window_ms, 2_000);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = ReplayArgs {
            poll_interval_ms: Some(0),
            ..args()
        };
        assert!(args.apply(MonitorConfig::default()).is_err());
    }
}
