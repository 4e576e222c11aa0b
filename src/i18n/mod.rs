//! Translation dictionary loading, caching and lookup.
//!
//! # Overview
//!
//! The i18n system supports:
//! - **Dictionary Loading**: Loads `<lang>.yaml` (or `.yml`) files from a root directory
//! - **Caching**: Each language is read once and kept in memory; concurrent cold loads
//!   are serialized so a file is never parsed twice for the same miss
//! - **Fallback Chain**: exact code -> language family (`en` for `en-us`) -> default
//!   language -> the message key itself
//! - **Debug Mode**: With `APP_DEBUG=true` every lookup bypasses the cache, so edits to
//!   dictionary files show up without a restart
//!
//! # Dictionary Files
//!
//! ```yaml
//! version: "1"
//! lang: zh-tw
//! name: Traditional Chinese
//! dict:
//!   hello: "你好"
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use langfile::i18n::Translator;
//!
//! let translator = Translator::with_static("resources/translation", true, "zh-tw");
//! let en = translator.get_lang_file("en-US");
//! println!("{}", en.t("hello"));
//! ```
//!
//! The package-level functions ([`get_lang_file`], [`lang_files`], [`t`]) use a shared
//! default translator that reads [`set_lang_root_path`], [`set_default_lang`] and
//! [`set_translate_fallback`] on every call.
//!
//! # Error Handling
//!
//! - Missing files are silent and simply move on to the next fallback
//! - Malformed files are logged at warn level and treated as missing
//! - Lookups never fail; the last resort is the key itself

mod cache;
mod code;
mod config;
mod loader;
mod settings;
mod translations;
mod translator;

use std::sync::{Arc, OnceLock};

pub use cache::{AggregateCache, LangCache};
pub use code::{family_prefix, is_valid_lang_code, lang_code_from_file_name, normalize_lang};
pub use config::{
    DEBUG_ENV, DEFAULT_LANG, DEFAULT_LANG_ROOT_PATH, DEFAULT_TRANSLATE_FALLBACK, DebugMode,
    GlobalConfig, LEGACY_DEBUG_ENV, ProviderConfig, StaticConfig, TranslatorConfig,
    default_lang, is_debug_env, lang_root_path, set_default_lang, set_lang_root_path,
    set_translate_fallback, translate_fallback,
};
pub use loader::{
    LANG_FILE_EXTENSIONS, LangDocument, LoadError, load_lang_document, parse_lang_document,
};
pub use settings::{Settings, SettingsError};
pub use translations::{LangFile, TranslationMap, translate};
pub use translator::Translator;

/// Shared translator behind the package-level functions.
static DEFAULT_TRANSLATOR: OnceLock<Translator> = OnceLock::new();

/// What: The process-wide default translator.
///
/// Output:
/// - Translator over `GlobalConfig`, created on first use
///
/// Details:
/// - Reads the global root path, default language and fallback flag on every call
/// - Its cache survives changes to the globals; call `clear_cache` after moving the
///   root path, or run with debug mode on
#[must_use]
pub fn default_translator() -> &'static Translator {
    DEFAULT_TRANSLATOR.get_or_init(|| Translator::new(GlobalConfig))
}

/// Every dictionary in the global root directory, via the default translator.
#[must_use]
pub fn lang_files() -> Vec<Arc<LangFile>> {
    default_translator().lang_files()
}

/// Resolve `lang` to a usable entry via the default translator.
#[must_use]
pub fn get_lang_file(lang: &str) -> Arc<LangFile> {
    default_translator().get_lang_file(lang)
}

/// Translate `message` for `lang` via the default translator.
#[must_use]
pub fn t(lang: &str, message: &str) -> String {
    default_translator().t(lang, message)
}
