//! Shared utilities for argument processing.

use langfile::i18n::{Settings, SettingsError, StaticConfig, Translator};

use crate::args::Args;

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level` argument.
pub fn determine_log_level(args: &Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Build the effective settings from the optional settings file and flags.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Settings with command-line flags applied over the file (or the defaults).
///
/// # Errors
/// - Returns `SettingsError` when `--config` points at an unreadable or invalid file.
pub fn resolve_settings(args: &Args) -> Result<Settings, SettingsError> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    if let Some(root) = &args.root {
        settings.root_path.clone_from(root);
    }
    if let Some(lang) = &args.default_lang {
        settings.default_lang.clone_from(lang);
    }
    if args.no_fallback {
        settings.translate_fallback = false;
    }
    if args.debug {
        settings.debug = Some(true);
    }
    Ok(settings)
}

/// Build a translator over fixed settings.
pub fn build_translator(settings: Settings) -> Translator {
    let config: StaticConfig = settings.into_config();
    Translator::new(config)
}
