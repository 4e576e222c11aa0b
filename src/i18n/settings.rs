//! TOML settings for building a translator or seeding the process-wide globals.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::i18n::config::{
    self, DEFAULT_LANG, DEFAULT_LANG_ROOT_PATH, DEFAULT_TRANSLATE_FALLBACK, DebugMode,
    StaticConfig,
};

/// Translator settings as written in a TOML file.
///
/// ```toml
/// root_path = "resources/translation"
/// default_lang = "en"
/// translate_fallback = true
/// debug = false   # omit to follow APP_DEBUG / LANGFILE_DEBUG
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Dictionary directory.
    pub root_path: PathBuf,
    /// Fallback language code.
    pub default_lang: String,
    /// Whether missing keys fall back to `default_lang`.
    pub translate_fallback: bool,
    /// Pinned debug flag; `None` means "read the environment".
    pub debug: Option<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from(DEFAULT_LANG_ROOT_PATH),
            default_lang: DEFAULT_LANG.to_string(),
            translate_fallback: DEFAULT_TRANSLATE_FALLBACK,
            debug: None,
        }
    }
}

/// Reasons a settings file could not be used.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The file could not be read.
    #[error("failed to read settings {}: {source}", .path.display())]
    Io {
        /// Settings file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid TOML for `Settings`.
    #[error("failed to parse settings {}: {source}", .path.display())]
    Parse {
        /// Settings file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

impl Settings {
    /// What: Read settings from a TOML file.
    ///
    /// Inputs:
    /// - `path`: Settings file
    ///
    /// Output:
    /// - Parsed settings; keys absent from the file keep their defaults
    ///
    /// # Errors
    /// - `SettingsError::Io` when the file cannot be read
    /// - `SettingsError::Parse` when the content is not valid settings TOML
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Parse settings from TOML text.
    ///
    /// # Errors
    /// - Returns the TOML error when the text is malformed or has wrongly typed keys
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Turn the settings into a fixed translator configuration.
    #[must_use]
    pub fn into_config(self) -> StaticConfig {
        StaticConfig::new(self.root_path, self.translate_fallback, self.default_lang)
            .with_debug(DebugMode::from(self.debug))
    }

    /// What: Push the settings into the process-wide globals read by the default translator.
    ///
    /// Details:
    /// - `debug` is not applied; the default translator always follows the environment
    pub fn apply_global(&self) {
        config::set_lang_root_path(self.root_path.clone());
        config::set_default_lang(self.default_lang.clone());
        config::set_translate_fallback(self.translate_fallback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_toml_str_full() {
        let settings = Settings::from_toml_str(
            r#"
root_path = "/srv/i18n"
default_lang = "en"
translate_fallback = false
debug = true
"#,
        )
        .expect("Failed to parse settings TOML");

        assert_eq!(settings.root_path, PathBuf::from("/srv/i18n"));
        assert_eq!(settings.default_lang, "en");
        assert!(!settings.translate_fallback);
        assert_eq!(settings.debug, Some(true));
    }

    #[test]
    fn test_from_toml_str_defaults() {
        let settings = Settings::from_toml_str("default_lang = \"ja\"\n")
            .expect("Failed to parse partial settings TOML");

        assert_eq!(settings.root_path, PathBuf::from("./resources/translation"));
        assert_eq!(settings.default_lang, "ja");
        assert!(settings.translate_fallback);
        assert_eq!(settings.debug, None);
        assert_eq!(Settings::from_toml_str("").ok(), Some(Settings::default()));
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        assert!(Settings::from_toml_str("translate_fallback = \"yes\"").is_err());
    }

    #[test]
    fn test_into_config() {
        let settings = Settings {
            root_path: PathBuf::from("dicts"),
            default_lang: "fr".to_string(),
            translate_fallback: false,
            debug: Some(false),
        };
        let config = settings.into_config();

        assert_eq!(config.root_path, PathBuf::from("dicts"));
        assert_eq!(config.default_lang, "fr");
        assert!(!config.translate_fallback);
        assert_eq!(config.debug, DebugMode::Disabled);
    }

    #[test]
    fn test_load_errors() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");

        let missing = Settings::load(&temp_dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(SettingsError::Io { .. })));

        let bad = temp_dir.path().join("bad.toml");
        fs::write(&bad, "root_path = [").expect("Failed to write bad settings");
        let err = Settings::load(&bad).expect_err("bad settings should fail");
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_load_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let path = temp_dir.path().join("langfile.toml");
        fs::write(&path, "root_path = \"locales\"\n").expect("Failed to write settings");

        let settings = Settings::load(&path).expect("Failed to load settings");
        assert_eq!(settings.root_path, PathBuf::from("locales"));
        assert_eq!(settings.default_lang, "zh-tw");
    }
}
