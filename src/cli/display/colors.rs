//! Result color mapping for CLI output.
//!
//! Styling is disabled automatically by `console` when stdout is not a
//! terminal or `NO_COLOR` is set.

use console::{style, StyledObject};

use crate::domain::models::MonitorResult;

/// Returns a styled label for a terminal monitor result.
///
/// Green: complete. Yellow: continuation required. Red: timed out or no
/// snapshot observed.
pub fn colorize_result(result: MonitorResult) -> StyledObject<&'static str> {
    let label = style(result.as_str());
    match result {
        MonitorResult::Complete => label.green().bold(),
        MonitorResult::ContinuationRequired => label.yellow().bold(),
        MonitorResult::TimedOut | MonitorResult::NoSnapshotObserved => label.red().bold(),
    }
}
