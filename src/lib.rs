//! Library entry for langfile: per-language dictionary loading, caching and lookup.

pub mod i18n;

pub use i18n::{LangFile, Translator, get_lang_file, lang_files, t};
