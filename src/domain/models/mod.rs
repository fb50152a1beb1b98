pub mod config;
pub mod monitor;
pub mod snapshot;

pub use config::{Config, LoggingConfig};
pub use monitor::{MonitorConfig, MIN_POLL_INTERVAL, MonitorPhase, MonitorReport, MonitorResult};
pub use snapshot::TurnSnapshot;
