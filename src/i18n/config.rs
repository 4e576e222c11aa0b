//! Translator configuration providers.
//!
//! Every value a `Translator` needs is read through [`TranslatorConfig`] on each
//! call, so a provider may hand out fixed values ([`StaticConfig`]), values computed
//! by closures ([`ProviderConfig`]), or the process-wide globals ([`GlobalConfig`]).

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::sync::{OnceLock, PoisonError, RwLock};

/// Root directory searched for dictionary files when nothing else is configured.
pub const DEFAULT_LANG_ROOT_PATH: &str = "./resources/translation";
/// Language used when a requested language cannot be loaded.
pub const DEFAULT_LANG: &str = "zh-tw";
/// Whether lookups fall back to the default language out of the box.
pub const DEFAULT_TRANSLATE_FALLBACK: bool = true;
/// Environment variable that enables debug mode.
pub const DEBUG_ENV: &str = "APP_DEBUG";
/// Older environment variable consulted when [`DEBUG_ENV`] is unset or empty.
pub const LEGACY_DEBUG_ENV: &str = "LANGFILE_DEBUG";

/// Source of the values a `Translator` reads on every operation.
pub trait TranslatorConfig: Send + Sync {
    /// Directory holding the `<lang>.yaml` dictionary files.
    fn root_path(&self) -> PathBuf;
    /// Language code used when the requested one cannot be loaded.
    fn default_lang(&self) -> String;
    /// Whether missing keys fall back to the default language.
    fn translate_fallback(&self) -> bool;
    /// Whether caching is bypassed so edits on disk are observed immediately.
    fn debug(&self) -> bool {
        is_debug_env()
    }
}

/// What: Read the debug flag from the environment.
///
/// Output:
/// - `true` only when the effective variable equals "true" (case-insensitive)
///
/// Details:
/// - `APP_DEBUG` wins whenever it holds a non-empty value
/// - Otherwise `LANGFILE_DEBUG` is consulted
#[must_use]
pub fn is_debug_env() -> bool {
    [DEBUG_ENV, LEGACY_DEBUG_ENV]
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.is_empty())
        .is_some_and(|value| value.eq_ignore_ascii_case("true"))
}

/// How a configuration decides whether debug mode is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugMode {
    /// Read `APP_DEBUG` / `LANGFILE_DEBUG` on every call.
    #[default]
    FromEnv,
    /// Always on.
    Enabled,
    /// Always off.
    Disabled,
}

impl DebugMode {
    /// Resolve the mode to a flag, consulting the environment for [`DebugMode::FromEnv`].
    #[must_use]
    pub fn is_enabled(self) -> bool {
        match self {
            Self::FromEnv => is_debug_env(),
            Self::Enabled => true,
            Self::Disabled => false,
        }
    }
}

impl From<Option<bool>> for DebugMode {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::FromEnv,
            Some(true) => Self::Enabled,
            Some(false) => Self::Disabled,
        }
    }
}

/// Fixed configuration values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticConfig {
    /// Directory holding the dictionary files.
    pub root_path: PathBuf,
    /// Fallback language code.
    pub default_lang: String,
    /// Whether missing keys fall back to the default language.
    pub translate_fallback: bool,
    /// Debug-mode source.
    pub debug: DebugMode,
}

impl StaticConfig {
    /// What: Build a static configuration whose debug flag follows the environment.
    ///
    /// Inputs:
    /// - `root_path`: Dictionary directory
    /// - `translate_fallback`: Whether to fall back to `default_lang`
    /// - `default_lang`: Fallback language code
    #[must_use]
    pub fn new(
        root_path: impl Into<PathBuf>,
        translate_fallback: bool,
        default_lang: impl Into<String>,
    ) -> Self {
        Self {
            root_path: root_path.into(),
            default_lang: default_lang.into(),
            translate_fallback,
            debug: DebugMode::FromEnv,
        }
    }

    /// Replace the debug-mode source.
    #[must_use]
    pub const fn with_debug(mut self, debug: DebugMode) -> Self {
        self.debug = debug;
        self
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_LANG_ROOT_PATH,
            DEFAULT_TRANSLATE_FALLBACK,
            DEFAULT_LANG,
        )
    }
}

impl TranslatorConfig for StaticConfig {
    fn root_path(&self) -> PathBuf {
        self.root_path.clone()
    }

    fn default_lang(&self) -> String {
        self.default_lang.clone()
    }

    fn translate_fallback(&self) -> bool {
        self.translate_fallback
    }

    fn debug(&self) -> bool {
        self.debug.is_enabled()
    }
}

/// Boxed zero-argument provider.
type Provider<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Configuration whose values come from closures evaluated on every call.
pub struct ProviderConfig {
    /// Yields the dictionary directory.
    root_path: Provider<PathBuf>,
    /// Yields the fallback flag.
    translate_fallback: Provider<bool>,
    /// Yields the default language code.
    default_lang: Provider<String>,
    /// Yields the debug flag.
    debug: Provider<bool>,
}

impl ProviderConfig {
    /// What: Build a configuration from four providers.
    ///
    /// Inputs:
    /// - `root_path`: Returns the dictionary directory
    /// - `translate_fallback`: Returns whether default-language fallback is on
    /// - `default_lang`: Returns the fallback language code
    /// - `debug`: Returns whether debug mode is on
    ///
    /// Details:
    /// - The closures are called on every translator operation, never cached
    #[must_use]
    pub fn new<R, F, L, D>(root_path: R, translate_fallback: F, default_lang: L, debug: D) -> Self
    where
        R: Fn() -> PathBuf + Send + Sync + 'static,
        F: Fn() -> bool + Send + Sync + 'static,
        L: Fn() -> String + Send + Sync + 'static,
        D: Fn() -> bool + Send + Sync + 'static,
    {
        Self {
            root_path: Box::new(root_path),
            translate_fallback: Box::new(translate_fallback),
            default_lang: Box::new(default_lang),
            debug: Box::new(debug),
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("root_path", &(self.root_path)())
            .field("translate_fallback", &(self.translate_fallback)())
            .field("default_lang", &(self.default_lang)())
            .field("debug", &(self.debug)())
            .finish()
    }
}

impl TranslatorConfig for ProviderConfig {
    fn root_path(&self) -> PathBuf {
        (self.root_path)()
    }

    fn default_lang(&self) -> String {
        (self.default_lang)()
    }

    fn translate_fallback(&self) -> bool {
        (self.translate_fallback)()
    }

    fn debug(&self) -> bool {
        (self.debug)()
    }
}

/// Process-wide settings read by [`GlobalConfig`].
#[derive(Debug, Clone)]
struct GlobalSettings {
    /// Dictionary directory.
    root_path: PathBuf,
    /// Fallback language code.
    default_lang: String,
    /// Whether missing keys fall back to the default language.
    translate_fallback: bool,
}

/// Process-wide holder for the global settings.
static GLOBAL_SETTINGS: OnceLock<RwLock<GlobalSettings>> = OnceLock::new();

/// Get a reference to the global settings lock, initializing it with defaults if needed.
fn globals() -> &'static RwLock<GlobalSettings> {
    GLOBAL_SETTINGS.get_or_init(|| {
        RwLock::new(GlobalSettings {
            root_path: PathBuf::from(DEFAULT_LANG_ROOT_PATH),
            default_lang: DEFAULT_LANG.to_string(),
            translate_fallback: DEFAULT_TRANSLATE_FALLBACK,
        })
    })
}

/// Snapshot the global settings.
fn read_globals() -> GlobalSettings {
    globals()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Apply `update` to the global settings under the write lock.
fn update_globals(update: impl FnOnce(&mut GlobalSettings)) {
    let mut guard = globals().write().unwrap_or_else(PoisonError::into_inner);
    update(&mut guard);
}

/// Set the process-wide dictionary directory.
pub fn set_lang_root_path(path: impl Into<PathBuf>) {
    let path = path.into();
    tracing::debug!(path = %path.display(), "global lang root path updated");
    update_globals(|settings| settings.root_path = path);
}

/// Set the process-wide default language code.
pub fn set_default_lang(lang: impl Into<String>) {
    let lang = lang.into();
    tracing::debug!(lang = %lang, "global default lang updated");
    update_globals(|settings| settings.default_lang = lang);
}

/// Enable or disable default-language fallback process-wide.
pub fn set_translate_fallback(enabled: bool) {
    tracing::debug!(enabled, "global translate fallback updated");
    update_globals(|settings| settings.translate_fallback = enabled);
}

/// Current process-wide dictionary directory.
#[must_use]
pub fn lang_root_path() -> PathBuf {
    read_globals().root_path
}

/// Current process-wide default language code.
#[must_use]
pub fn default_lang() -> String {
    read_globals().default_lang
}

/// Current process-wide fallback flag.
#[must_use]
pub fn translate_fallback() -> bool {
    read_globals().translate_fallback
}

/// Configuration that reads the process-wide globals at call time.
///
/// Backs the default translator; the debug flag always follows the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalConfig;

impl TranslatorConfig for GlobalConfig {
    fn root_path(&self) -> PathBuf {
        lang_root_path()
    }

    fn default_lang(&self) -> String {
        default_lang()
    }

    fn translate_fallback(&self) -> bool {
        translate_fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// What: Run `f` with the debug variables set, restoring the originals afterwards.
    fn with_debug_env(primary: Option<&str>, legacy: Option<&str>, f: impl FnOnce()) {
        let original_primary = env::var(DEBUG_ENV).ok();
        let original_legacy = env::var(LEGACY_DEBUG_ENV).ok();

        let apply = |name: &str, value: Option<&str>| unsafe {
            match value {
                Some(v) => env::set_var(name, v),
                None => env::remove_var(name),
            }
        };

        apply(DEBUG_ENV, primary);
        apply(LEGACY_DEBUG_ENV, legacy);
        f();
        apply(DEBUG_ENV, original_primary.as_deref());
        apply(LEGACY_DEBUG_ENV, original_legacy.as_deref());
    }

    #[test]
    #[serial]
    fn test_debug_env_primary_wins() {
        with_debug_env(Some("TRUE"), Some("FALSE"), || assert!(is_debug_env()));
        with_debug_env(Some("false"), Some("true"), || assert!(!is_debug_env()));
    }

    #[test]
    #[serial]
    fn test_debug_env_legacy_used_when_primary_empty() {
        with_debug_env(Some(""), Some("TRUE"), || assert!(is_debug_env()));
        with_debug_env(None, Some("true"), || assert!(is_debug_env()));
    }

    #[test]
    #[serial]
    fn test_debug_env_requires_exact_true() {
        with_debug_env(Some("1"), None, || assert!(!is_debug_env()));
        with_debug_env(Some("yes"), None, || assert!(!is_debug_env()));
        with_debug_env(Some(" true"), None, || assert!(!is_debug_env()));
        with_debug_env(Some("True"), None, || assert!(is_debug_env()));
        with_debug_env(None, None, || assert!(!is_debug_env()));
    }

    #[test]
    #[serial]
    fn test_debug_mode_resolution() {
        with_debug_env(Some("true"), None, || {
            assert!(DebugMode::FromEnv.is_enabled());
            assert!(!DebugMode::Disabled.is_enabled());
        });
        with_debug_env(None, None, || {
            assert!(!DebugMode::FromEnv.is_enabled());
            assert!(DebugMode::Enabled.is_enabled());
        });
        assert_eq!(DebugMode::from(None), DebugMode::FromEnv);
        assert_eq!(DebugMode::from(Some(true)), DebugMode::Enabled);
        assert_eq!(DebugMode::from(Some(false)), DebugMode::Disabled);
    }

    #[test]
    fn test_static_config_defaults() {
        let config = StaticConfig::default();
        assert_eq!(config.root_path(), PathBuf::from("./resources/translation"));
        assert_eq!(config.default_lang(), "zh-tw");
        assert!(config.translate_fallback());
        assert_eq!(config.debug, DebugMode::FromEnv);
    }

    #[test]
    fn test_provider_config_reevaluates() {
        let fallback = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&fallback);
        let config = ProviderConfig::new(
            || PathBuf::from("/tmp/dicts"),
            move || flag.load(Ordering::SeqCst),
            || "en".to_string(),
            || false,
        );

        assert!(config.translate_fallback());
        fallback.store(false, Ordering::SeqCst);
        assert!(!config.translate_fallback());
        assert_eq!(config.default_lang(), "en");
        assert!(!config.debug());
        assert!(format!("{config:?}").contains("/tmp/dicts"));
    }

    #[test]
    #[serial]
    fn test_global_config_follows_setters() {
        let original_root = lang_root_path();
        let original_lang = default_lang();
        let original_fallback = translate_fallback();

        set_lang_root_path("/srv/translations");
        set_default_lang("ja");
        set_translate_fallback(false);

        let config = GlobalConfig;
        assert_eq!(config.root_path(), PathBuf::from("/srv/translations"));
        assert_eq!(config.default_lang(), "ja");
        assert!(!config.translate_fallback());

        set_lang_root_path(original_root);
        set_default_lang(original_lang);
        set_translate_fallback(original_fallback);
    }
}
