//! Infrastructure layer module
//!
//! This module contains cross-cutting infrastructure:
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod logging;
