//! Command-line argument parsing and handling.

pub mod commands;
pub mod definition;
pub mod utils;

// Re-export commonly used items
pub use definition::{Args, Command};
pub use utils::{build_translator, determine_log_level, resolve_settings};
