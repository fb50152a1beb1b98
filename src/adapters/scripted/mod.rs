//! Scripted, time-indexed implementation of every monitor port.
//!
//! Used by the `replay` command to exercise the monitor against a recorded
//! or hand-written session, and by tests to drive it on a paused clock.

pub mod script;
pub mod session;

pub use script::{ScriptError, ScriptFrame, SessionScript};
pub use session::ScriptedSession;
