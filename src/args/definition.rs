//! Command-line argument definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// langfile - inspect and query per-language YAML translation dictionaries
#[derive(Parser, Debug)]
#[command(name = "langfile")]
#[command(version)]
#[command(about = "Inspect and query per-language YAML translation dictionaries", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Settings file (TOML) with root_path, default_lang, translate_fallback and debug
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding the <lang>.yaml dictionaries (overrides the settings file)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Language used when the requested one has no dictionary (overrides the settings file)
    #[arg(long)]
    pub default_lang: Option<String>,

    /// Do not fall back to the default language for missing keys
    #[arg(long)]
    pub no_fallback: bool,

    /// Bypass all caching, as with APP_DEBUG=true
    #[arg(long)]
    pub debug: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every dictionary in the root directory
    List,
    /// Translate one or more message keys for a language
    Get {
        /// Language code (e.g., en-US)
        lang: String,
        /// Message keys to translate
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Show the dictionary a language code resolves to
    Show {
        /// Language code (e.g., en-US)
        lang: String,
    },
}
