//! End-to-end lookups against dictionary directories on disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use langfile::i18n::{LangFile, Translator, translate};
use tempfile::TempDir;

fn write_dict(root: &Path, file: &str, body: &str) {
    fs::write(root.join(file), body).expect("Failed to write dictionary fixture");
}

/// zh-tw is the default; en has a partial dictionary; ja is empty.
fn setup() -> (TempDir, Translator) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    let root = temp_dir.path();
    write_dict(
        root,
        "zh-tw.yaml",
        "version: \"1\"\nlang: zh-tw\nname: 繁體中文\ndict:\n  hello: \"你好\"\n  bye: \"再見\"\n  thanks: \"謝謝\"\n",
    );
    write_dict(
        root,
        "en.yaml",
        "version: \"1\"\nlang: en\nname: English\ndict:\n  hello: Hello\n  bye: Goodbye\n",
    );
    write_dict(root, "ja.yml", "version: \"1\"\nlang: ja\nname: 日本語\n");
    let translator = Translator::with_static(root, true, "zh-tw");
    (temp_dir, translator)
}

#[test]
fn regional_code_resolves_through_family_then_default() {
    let (_dir, translator) = setup();
    let en_us = translator.get_lang_file("en-US");

    assert_eq!(en_us.lang(), "en");
    assert_eq!(en_us.t("hello"), "Hello");
    assert_eq!(en_us.t("thanks"), "謝謝");
    assert_eq!(en_us.t("missing.key"), "missing.key");
    assert_eq!(translator.t("EN-us", "bye"), "Goodbye");
}

#[test]
fn regional_code_is_cached_under_both_keys() {
    let (_dir, translator) = setup();
    let first = translator.get_lang_file("en-GB");
    let family = translator.get_lang_file("en");

    assert!(Arc::ptr_eq(&first, &family));
    assert_eq!(translator.cached_langs(), vec!["en".to_string(), "en-gb".to_string()]);
}

#[test]
fn unknown_language_uses_default_dictionary() {
    let (_dir, translator) = setup();
    let fr = translator.get_lang_file("fr-CA");

    assert_eq!(fr.lang(), "zh-tw");
    assert_eq!(fr.t("hello"), "你好");
}

#[test]
fn missing_default_yields_empty_entry() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    let translator = Translator::with_static(temp_dir.path(), true, "zh-tw");
    let entry = translator.get_lang_file("de");

    assert!(entry.is_empty());
    assert_eq!(entry.lang(), "");
    assert_eq!(entry.t("hello"), "hello");
    assert!(translator.lang_files().is_empty());
}

#[test]
fn fallback_disabled_returns_key() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    write_dict(
        temp_dir.path(),
        "zh-tw.yaml",
        "lang: zh-tw\ndict:\n  thanks: \"謝謝\"\n",
    );
    write_dict(temp_dir.path(), "en.yaml", "lang: en\ndict:\n  hello: Hello\n");
    let translator = Translator::with_static(temp_dir.path(), false, "zh-tw");

    assert_eq!(translator.t("en", "hello"), "Hello");
    assert_eq!(translator.t("en", "thanks"), "thanks");
}

#[test]
fn yml_extension_and_empty_dictionary() {
    let (_dir, translator) = setup();
    let ja = translator
        .load_lang_file("ja")
        .expect("ja.yml should be loaded");

    assert_eq!(ja.name(), "日本語");
    assert!(ja.is_empty());
    assert_eq!(ja.t("bye"), "再見");
}

#[test]
fn lang_files_lists_each_file_once_and_is_stable() {
    let (_dir, translator) = setup();
    let first = translator.lang_files();
    let second = translator.lang_files();

    let mut langs: Vec<&str> = first.iter().map(|f| f.lang()).collect();
    langs.sort_unstable();
    assert_eq!(langs, vec!["en", "ja", "zh-tw"]);
    assert_eq!(first.len(), second.len());
    assert!(
        first
            .iter()
            .zip(&second)
            .all(|(a, b)| Arc::ptr_eq(a, b))
    );
}

#[test]
fn translate_helper_handles_absent_entry() {
    let (_dir, translator) = setup();
    let en = translator.get_lang_file("en");

    assert_eq!(translate(None, "hello"), "hello");
    assert_eq!(translate(Some(en.as_ref()), "hello"), "Hello");
    assert_eq!(translate(Some(&*LangFile::empty()), "hello"), "hello");
}

#[test]
fn entries_outlive_their_translator() {
    let (_dir, translator) = setup();
    let en = translator.get_lang_file("en");
    drop(translator);

    assert_eq!(en.t("hello"), "Hello");
    // Without the translator there is nothing left to fall back to.
    assert_eq!(en.t("thanks"), "thanks");
    assert!(en.translator().is_none());
}
