//! Session script file format.
//!
//! ```yaml
//! dispatch_outcomes: [true]
//! frames:
//!   - at_ms: 0
//!     snapshot: { text_length: 0, streaming: true }
//!   - at_ms: 1200
//!     snapshot: { text_length: 300, continuation_available: true }
//!   - at_ms: 1200
//!     after_continuations: 1
//!     snapshot: { text_length: 320, streaming: true }
//!   - at_ms: 4000
//!     after_continuations: 1
//!     snapshot: { text_length: 610, regenerate_available: true }
//!     text: "..."
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::domain::models::TurnSnapshot;

/// Errors loading a session script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse script: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Script has no frames")]
    Empty,
}

/// One timed observation in a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptFrame {
    /// Offset from script start at which this frame becomes visible.
    pub at_ms: u64,

    /// Successful continuation dispatches required before this frame applies.
    #[serde(default)]
    pub after_continuations: u32,

    /// Observation to report; absent means the provider cannot observe.
    #[serde(default)]
    pub snapshot: Option<TurnSnapshot>,

    /// Full turn text, if readable at this point.
    #[serde(default)]
    pub text: Option<String>,
}

impl ScriptFrame {
    pub const fn at(at_ms: u64, snapshot: TurnSnapshot) -> Self {
        Self {
            at_ms,
            after_continuations: 0,
            snapshot: Some(snapshot),
            text: None,
        }
    }

    /// Frame during which the provider cannot observe anything.
    pub const fn unobservable(at_ms: u64) -> Self {
        Self {
            at_ms,
            after_continuations: 0,
            snapshot: None,
            text: None,
        }
    }

    pub fn after_continuations(mut self, count: u32) -> Self {
        self.after_continuations = count;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// A complete scripted session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionScript {
    /// Timeline of observations; order in the file does not matter.
    #[serde(default)]
    pub frames: Vec<ScriptFrame>,

    /// Results returned by successive continuation dispatches; `false` once exhausted.
    #[serde(default)]
    pub dispatch_outcomes: Vec<bool>,
}

impl SessionScript {
    pub fn new(frames: Vec<ScriptFrame>) -> Self {
        Self {
            frames,
            dispatch_outcomes: Vec::new(),
        }
    }

    pub fn with_dispatch_outcomes(mut self, outcomes: Vec<bool>) -> Self {
        self.dispatch_outcomes = outcomes;
        self
    }

    /// Parse a script from YAML (JSON is accepted as a YAML subset).
    pub fn from_yaml_str(content: &str) -> Result<Self, ScriptError> {
        let script: Self = serde_yaml::from_str(content)?;
        if script.frames.is_empty() {
            return Err(ScriptError::Empty);
        }
        Ok(script)
    }

    /// Load a script from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Latest frame visible at `elapsed_ms` after `continuations` successful dispatches.
    ///
    /// Among frames with equal `at_ms`, the one requiring more continuations wins.
    pub fn frame_at(&self, elapsed_ms: u64, continuations: u32) -> Option<&ScriptFrame> {
        self.eligible(elapsed_ms, continuations)
            .max_by_key(|frame| (frame.at_ms, frame.after_continuations))
    }

    /// Text of the latest visible frame that carries one.
    pub fn text_at(&self, elapsed_ms: u64, continuations: u32) -> Option<&str> {
        self.eligible(elapsed_ms, continuations)
            .filter(|frame| frame.text.is_some())
            .max_by_key(|frame| (frame.at_ms, frame.after_continuations))
            .and_then(|frame| frame.text.as_deref())
    }

    fn eligible(
        &self,
        elapsed_ms: u64,
        continuations: u32,
    ) -> impl Iterator<Item = &ScriptFrame> {
        self.frames.iter().filter(move |frame| {
            frame.at_ms <= elapsed_ms && frame.after_continuations <= continuations
        })
    }
}
