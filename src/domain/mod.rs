//! Domain layer for the Turnwatch completion monitor
//!
//! This module contains the snapshot and monitor models, the ports through
//! which the monitor observes and acts on the external surface, and the
//! domain error types.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{ConfigError, MonitorError, MonitorOutcome};
