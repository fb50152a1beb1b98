//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces for the collaborators the
//! completion monitor consumes but does not own:
//! - SnapshotProvider: side-effect-free observation of the latest turn
//! - FullTextReader: one-shot read of the latest turn's finished text
//! - ActionDispatcher: single "resume truncated generation" action
//!
//! All fuzzy label and text matching against the observed surface lives
//! behind these traits; the monitor only sees typed values.

pub mod action_dispatcher;
pub mod full_text_reader;
pub mod snapshot_provider;

pub use action_dispatcher::ActionDispatcher;
pub use full_text_reader::FullTextReader;
pub use snapshot_provider::SnapshotProvider;
