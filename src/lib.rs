//! Turnwatch - completion monitor for externally generated text streams
//!
//! Turnwatch decides when a text turn produced by an external, uncontrolled
//! surface has actually finished rather than merely looking finished for a
//! moment. It reconciles three weak signals with a 2-of-3 quorum, tracks
//! length stability, and resumes truncated output within a bounded budget.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Snapshot and monitor models, ports, errors
//! - **Service Layer** (`services`): The completion monitor and its components
//! - **Adapters** (`adapters`): Port implementations (scripted sessions)
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use turnwatch::{CompletionMonitor, MonitorConfig, MonitorResult};
//!
//! # async fn example(session: Arc<MySession>) {
//! let mut monitor = CompletionMonitor::new(session.clone(), session.clone(), session);
//! if monitor.wait_until_complete(&MonitorConfig::default()).await == MonitorResult::Complete {
//!     let text = monitor.extract_final_text(1).await;
//! }
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{ConfigError, MonitorError};
pub use domain::models::{
    Config, LoggingConfig, MonitorConfig, MonitorPhase, MonitorReport, MonitorResult, TurnSnapshot,
};
pub use domain::ports::{ActionDispatcher, FullTextReader, SnapshotProvider};
pub use infrastructure::config::ConfigLoader;
pub use services::{CompletionMonitor, ContinuationGovernor, QuorumVote, StabilityTracker};
