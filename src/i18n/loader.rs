//! Dictionary file loading and parsing.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::i18n::code::is_valid_lang_code;

/// File extensions tried, in order, for `<lang>.<ext>`.
pub const LANG_FILE_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// On-disk layout of a dictionary file.
///
/// ```yaml
/// version: "1"
/// lang: zh-tw
/// name: Traditional Chinese
/// dict:
///   hello: "你好"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LangDocument {
    /// Informational version string.
    pub version: String,
    /// Canonical language code declared by the file.
    pub lang: String,
    /// Human-readable language name.
    pub name: String,
    /// Message key -> localized string.
    pub dict: HashMap<String, String>,
}

/// Reasons a dictionary file could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The code cannot be mapped to a file name.
    #[error("invalid language code '{0}'")]
    InvalidCode(String),
    /// No `<lang>.yaml` or `<lang>.yml` exists under the root.
    #[error("no dictionary file for '{lang}' in {}", .root.display())]
    NotFound {
        /// Requested code.
        lang: String,
        /// Directory that was searched.
        root: PathBuf,
    },
    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The file was read but is not a valid dictionary document.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_norway::Error,
    },
}

impl LoadError {
    /// Whether the error only means "nothing there", as opposed to a broken file.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidCode(_))
    }
}

/// What: Load and parse the dictionary file for a language code.
///
/// Inputs:
/// - `root`: Dictionary directory
/// - `lang`: Language code, already normalized by the caller
///
/// Output:
/// - Parsed `LangDocument`
///
/// # Errors
/// - `LoadError::InvalidCode` when `lang` is empty or could name a path outside `root`
/// - `LoadError::NotFound` when no `<lang>.yaml` / `<lang>.yml` exists
/// - `LoadError::Io` when the file exists but cannot be read
/// - `LoadError::Parse` when the YAML does not match the dictionary layout
///
/// Details:
/// - Extensions are tried in `LANG_FILE_EXTENSIONS` order; the first existing file wins
/// - A directory named like a dictionary file is skipped
pub fn load_lang_document(root: &Path, lang: &str) -> Result<LangDocument, LoadError> {
    if !is_valid_lang_code(lang) {
        return Err(LoadError::InvalidCode(lang.to_string()));
    }

    for ext in LANG_FILE_EXTENSIONS {
        let path = root.join(format!("{lang}.{ext}"));
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::IsADirectory
                ) =>
            {
                continue;
            }
            Err(source) => return Err(LoadError::Io { path, source }),
        };
        return parse_lang_document(&contents).map_err(|source| LoadError::Parse { path, source });
    }

    Err(LoadError::NotFound {
        lang: lang.to_string(),
        root: root.to_path_buf(),
    })
}

/// What: Parse YAML content into a `LangDocument`.
///
/// # Errors
/// - Returns the YAML error when the content is malformed or has the wrong shape
///
/// Details:
/// - Missing `version`/`lang`/`name` become empty strings, a missing `dict` an empty map
pub fn parse_lang_document(yaml_content: &str) -> Result<LangDocument, serde_norway::Error> {
    serde_norway::from_str(yaml_content)
}
