//! The translation engine: cached loading, resolution and directory enumeration.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::i18n::cache::{AggregateCache, LangCache};
use crate::i18n::code::{family_prefix, lang_code_from_file_name, normalize_lang};
use crate::i18n::config::{ProviderConfig, StaticConfig, TranslatorConfig};
use crate::i18n::loader::load_lang_document;
use crate::i18n::translations::LangFile;

/// Shared state behind a `Translator` handle.
pub struct Inner {
    /// Source of root path, default language, fallback and debug flags.
    config: Box<dyn TranslatorConfig>,
    /// Loaded entries and the load lock.
    cache: LangCache,
    /// Memoized result of `lang_files`.
    aggregate: AggregateCache,
}

/// Handle to a translation engine.
///
/// Cloning is cheap and every clone shares the same caches. Independent
/// translators (built with separate `new` calls) never share anything.
#[derive(Clone)]
pub struct Translator {
    /// Shared engine state.
    inner: Arc<Inner>,
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("root_path", &self.root_path())
            .field("default_lang", &self.default_lang())
            .field("translate_fallback", &self.translate_fallback())
            .field("cached", &self.inner.cache.len())
            .finish()
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(StaticConfig::default())
    }
}

impl Translator {
    /// Build a translator over any configuration provider.
    #[must_use]
    pub fn new(config: impl TranslatorConfig + 'static) -> Self {
        Self {
            inner: Arc::new(Inner {
                config: Box::new(config),
                cache: LangCache::new(),
                aggregate: AggregateCache::new(),
            }),
        }
    }

    /// What: Build a translator over fixed values.
    ///
    /// Inputs:
    /// - `root_path`: Dictionary directory
    /// - `translate_fallback`: Whether to fall back to `default_lang`
    /// - `default_lang`: Fallback language code
    ///
    /// Details:
    /// - Debug mode follows the `APP_DEBUG` / `LANGFILE_DEBUG` environment variables
    #[must_use]
    pub fn with_static(
        root_path: impl Into<PathBuf>,
        translate_fallback: bool,
        default_lang: impl Into<String>,
    ) -> Self {
        Self::new(StaticConfig::new(root_path, translate_fallback, default_lang))
    }

    /// Build a translator whose configuration is re-read from closures on every call.
    #[must_use]
    pub fn with_providers<R, F, L, D>(
        root_path: R,
        translate_fallback: F,
        default_lang: L,
        debug: D,
    ) -> Self
    where
        R: Fn() -> PathBuf + Send + Sync + 'static,
        F: Fn() -> bool + Send + Sync + 'static,
        L: Fn() -> String + Send + Sync + 'static,
        D: Fn() -> bool + Send + Sync + 'static,
    {
        Self::new(ProviderConfig::new(
            root_path,
            translate_fallback,
            default_lang,
            debug,
        ))
    }

    /// Rebuild a handle from state reached through an entry's back-reference.
    pub(crate) const fn from_inner(inner: Arc<Inner>) -> Self {
        Self { inner }
    }

    /// Current dictionary directory.
    #[must_use]
    pub fn root_path(&self) -> PathBuf {
        self.inner.config.root_path()
    }

    /// Current default language code.
    #[must_use]
    pub fn default_lang(&self) -> String {
        self.inner.config.default_lang()
    }

    /// Whether default-language fallback is currently enabled.
    #[must_use]
    pub fn translate_fallback(&self) -> bool {
        self.inner.config.translate_fallback()
    }

    /// Whether debug mode (no caching) is currently enabled.
    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.inner.config.debug()
    }

    /// What: Load the entry for a language code, through the cache.
    ///
    /// Inputs:
    /// - `lang`: Requested language code, any casing
    ///
    /// Output:
    /// - `Some(entry)` for the code itself or, failing that, for its family prefix
    /// - `None` when neither document loads
    ///
    /// Details:
    /// - Debug mode evicts the code and its family before looking, so edits on disk
    ///   are picked up on the very next call
    /// - Cache hits never take the load lock; misses re-check under it, so one
    ///   read-and-parse happens per code per miss even with concurrent callers
    /// - An entry found through the family is cached under both the family code and
    ///   the requested code
    /// - Malformed or unreadable documents are logged at warn level
    #[must_use]
    pub fn load_lang_file(&self, lang: &str) -> Option<Arc<LangFile>> {
        let lang = normalize_lang(lang);
        let family = family_prefix(&lang);
        let cache = &self.inner.cache;

        if self.is_debug() {
            cache.evict(&lang);
            if let Some(family) = family {
                cache.evict(family);
            }
        }

        if let Some(entry) = cache.get(&lang) {
            return Some(entry);
        }

        let _guard = cache.lock_loads();
        if let Some(entry) = cache.get(&lang) {
            return Some(entry);
        }

        let root = self.root_path();
        if let Some(entry) = self.read_entry(&root, &lang) {
            cache.insert(lang.as_str(), Arc::clone(&entry));
            return Some(entry);
        }

        let family = family?;
        let entry = match cache.get(family) {
            Some(entry) => entry,
            None => {
                let entry = self.read_entry(&root, family)?;
                cache.insert(family, Arc::clone(&entry));
                entry
            }
        };
        tracing::debug!(lang = %lang, family, "using language family dictionary");
        cache.insert(lang.as_str(), Arc::clone(&entry));
        Some(entry)
    }

    /// Read and parse one document into an entry owned by this translator.
    fn read_entry(&self, root: &Path, lang: &str) -> Option<Arc<LangFile>> {
        match load_lang_document(root, lang) {
            Ok(doc) => {
                tracing::debug!(
                    lang,
                    declared = %doc.lang,
                    keys = doc.dict.len(),
                    "loaded dictionary"
                );
                Some(Arc::new(LangFile::from_document(
                    doc,
                    Arc::downgrade(&self.inner),
                )))
            }
            Err(e) if e.is_not_found() => {
                tracing::trace!(lang, error = %e, "dictionary not found");
                None
            }
            Err(e) => {
                tracing::warn!(operation = "Translator.load_lang_file", lang, error = %e, "failed to load dictionary");
                None
            }
        }
    }

    /// What: Resolve a language code to a usable entry.
    ///
    /// Inputs:
    /// - `lang`: Requested language code
    ///
    /// Output:
    /// - The entry for `lang` (or its family), else the default language's entry, else
    ///   the shared empty entry
    #[must_use]
    pub fn get_lang_file(&self, lang: &str) -> Arc<LangFile> {
        self.load_lang_file(lang)
            .or_else(|| self.load_lang_file(&self.default_lang()))
            .unwrap_or_else(LangFile::empty)
    }

    /// Translate `message` for `lang`; shorthand for `get_lang_file(lang).t(message)`.
    #[must_use]
    pub fn t(&self, lang: &str, message: &str) -> String {
        self.get_lang_file(lang).t(message)
    }

    /// What: Load every dictionary in the root directory.
    ///
    /// Output:
    /// - Successfully loaded entries, in directory listing order
    ///
    /// Details:
    /// - The language code of each file is its name up to the first `.`
    /// - Outside debug mode the scan runs once and later calls return a copy of the
    ///   memoized list
    /// - In debug mode the whole cache is dropped and the directory is rescanned on
    ///   every call; nothing is memoized
    #[must_use]
    pub fn lang_files(&self) -> Vec<Arc<LangFile>> {
        if self.is_debug() {
            self.clear_cache();
            return self.scan_lang_files();
        }
        self.inner
            .aggregate
            .get_or_compute(|| self.scan_lang_files())
    }

    /// List the root directory and load each non-directory entry.
    fn scan_lang_files(&self) -> Vec<Arc<LangFile>> {
        let root = self.root_path();
        let dir = match fs::read_dir(&root) {
            Ok(dir) => dir,
            Err(e) => {
                tracing::debug!(path = %root.display(), error = %e, "cannot list dictionary directory");
                return Vec::new();
            }
        };

        let files: Vec<Arc<LangFile>> = dir
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| !t.is_dir()))
            .filter_map(|entry| {
                let file_name = entry.file_name();
                let file_name = file_name.to_string_lossy();
                let lang = lang_code_from_file_name(&file_name);
                if lang.is_empty() {
                    return None;
                }
                self.load_lang_file(lang)
            })
            .collect();

        tracing::debug!(path = %root.display(), count = files.len(), "scanned dictionary directory");
        files
    }

    /// Drop every cached entry and the memoized directory listing.
    pub fn clear_cache(&self) {
        {
            let _guard = self.inner.cache.lock_loads();
            self.inner.cache.clear();
        }
        self.inner.aggregate.invalidate();
    }

    /// Normalized codes currently cached, sorted.
    #[must_use]
    pub fn cached_langs(&self) -> Vec<String> {
        self.inner.cache.keys()
    }
}
