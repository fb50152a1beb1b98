//! Human-readable display helpers shared by CLI commands.

pub mod colors;
pub mod table;

pub use colors::colorize_result;
pub use table::detail_table;
