//! Loaded dictionary entries and translation lookup.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, Weak};

use crate::i18n::code::{family_prefix, normalize_lang};
use crate::i18n::loader::LangDocument;
use crate::i18n::translator::{Inner, Translator};

/// Dictionary map: message key -> localized string.
pub type TranslationMap = HashMap<String, String>;

/// One loaded language resource.
///
/// Entries are immutable once built and are handed out as `Arc<LangFile>`. Each
/// keeps a weak handle to the translator that loaded it, used only to walk the
/// fallback chain in [`LangFile::t`].
#[derive(Debug, Clone, Default)]
pub struct LangFile {
    /// Informational version string.
    version: String,
    /// Language code declared inside the file.
    lang: String,
    /// Human-readable name.
    name: String,
    /// Message key -> localized string.
    dict: TranslationMap,
    /// Translator that loaded this entry; dangling for the empty entry.
    owner: Weak<Inner>,
}

/// The shared entry returned when nothing can be loaded.
static EMPTY_LANG_FILE: OnceLock<Arc<LangFile>> = OnceLock::new();

impl LangFile {
    /// Build an entry from a parsed document, attached to its translator.
    pub(crate) fn from_document(doc: LangDocument, owner: Weak<Inner>) -> Self {
        Self {
            version: doc.version,
            lang: doc.lang,
            name: doc.name,
            dict: doc.dict,
            owner,
        }
    }

    /// What: The frozen empty entry used as the last resort by `get_lang_file`.
    ///
    /// Output:
    /// - Shared entry with no metadata, no dictionary and no translator
    ///
    /// Details:
    /// - Every lookup on it returns the requested key unchanged
    #[must_use]
    pub fn empty() -> Arc<Self> {
        Arc::clone(EMPTY_LANG_FILE.get_or_init(|| Arc::new(Self::default())))
    }

    /// Informational version string from the file.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Language code as declared inside the file (not the lookup key).
    #[must_use]
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Human-readable language name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entry's own dictionary, without any fallback.
    #[must_use]
    pub const fn dict(&self) -> &TranslationMap {
        &self.dict
    }

    /// Look up `key` in this entry's own dictionary only.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.dict.get(key).map(String::as_str)
    }

    /// Number of keys in the entry's own dictionary.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dict.len()
    }

    /// Whether the entry's own dictionary has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }

    /// The translator this entry was loaded by, if it is still alive.
    #[must_use]
    pub fn translator(&self) -> Option<Translator> {
        self.owner.upgrade().map(Translator::from_inner)
    }

    /// What: Translate a message key, walking the fallback chain.
    ///
    /// Inputs:
    /// - `message`: Message key to translate
    ///
    /// Output:
    /// - The best available localized string, or `message` itself
    ///
    /// Details:
    /// - Own dictionary first; a hit here wins over every fallback
    /// - Then the family entry of this entry's declared `lang` ("en" for "en-us")
    /// - Then, with fallback enabled, the default-language entry, unless its declared
    ///   `lang` equals this entry's declared `lang` (exact string comparison)
    /// - A declared `lang` is never consulted twice within one lookup, so files whose
    ///   declared codes point back at each other cannot loop
    #[must_use]
    pub fn t(&self, message: &str) -> String {
        self.lookup(message, &mut Vec::new())
    }

    /// Recursive step of [`LangFile::t`]; `visited` holds the declared codes already tried.
    fn lookup(&self, message: &str, visited: &mut Vec<String>) -> String {
        if let Some(translation) = self.dict.get(message) {
            return translation.clone();
        }
        visited.push(self.lang.clone());

        let Some(translator) = self.translator() else {
            return message.to_string();
        };

        let lang = normalize_lang(&self.lang);
        if let Some(family) = family_prefix(&lang)
            && let Some(family_file) = translator.load_lang_file(family)
            && !was_visited(visited, &family_file)
        {
            tracing::trace!(lang = %self.lang, family, key = message, "falling back to language family");
            return family_file.lookup(message, visited);
        }

        if translator.translate_fallback() {
            let default_file = translator.get_lang_file(&translator.default_lang());
            if self.lang != default_file.lang && !was_visited(visited, &default_file) {
                tracing::trace!(
                    lang = %self.lang,
                    default = %default_file.lang,
                    key = message,
                    "falling back to default language"
                );
                return default_file.lookup(message, visited);
            }
        }

        tracing::debug!(lang = %self.lang, key = message, "missing translation key, returning key as-is");
        message.to_string()
    }
}

/// Whether `entry`'s declared code was already tried in the current lookup.
fn was_visited(visited: &[String], entry: &LangFile) -> bool {
    visited.iter().any(|seen| *seen == entry.lang)
}

/// What: Translate against an optional entry.
///
/// Inputs:
/// - `lang_file`: Entry to translate against, or `None`
/// - `message`: Message key
///
/// Output:
/// - `message` unchanged when no entry is given, otherwise `LangFile::t`
#[must_use]
pub fn translate(lang_file: Option<&LangFile>, message: &str) -> String {
    lang_file.map_or_else(|| message.to_string(), |file| file.t(message))
}
