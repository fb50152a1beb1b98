//! Adapters implementing the monitor's ports.

pub mod scripted;
