//! Language code normalization utilities.

/// What: Normalize a language code for use as a cache key.
///
/// Inputs:
/// - `code`: Language code as requested by the caller (e.g., "zh-TW")
///
/// Output:
/// - Lower-cased code (e.g., "zh-tw")
///
/// Details:
/// - No other canonicalization is applied; underscores stay underscores
#[must_use]
pub fn normalize_lang(code: &str) -> String {
    code.to_lowercase()
}

/// What: Derive the language-family prefix of a code.
///
/// Inputs:
/// - `code`: Language code, usually already normalized
///
/// Output:
/// - `Some(prefix)` with the part before the first `-`, or `None` when the code has no
///   separator or the prefix would be empty
///
/// Details:
/// - "en-us" -> "en", "zh-hant-tw" -> "zh", "en" -> None, "-us" -> None
#[must_use]
pub fn family_prefix(code: &str) -> Option<&str> {
    code.split_once('-')
        .map(|(family, _)| family)
        .filter(|family| !family.is_empty())
}

/// What: Derive a candidate language code from a dictionary file name.
///
/// Inputs:
/// - `file_name`: Bare file name (e.g., "en-us.yaml")
///
/// Output:
/// - Everything before the first `.` (e.g., "en-us")
#[must_use]
pub fn lang_code_from_file_name(file_name: &str) -> &str {
    file_name
        .split_once('.')
        .map_or(file_name, |(stem, _)| stem)
}

/// What: Check that a language code is safe to turn into a file name.
///
/// Inputs:
/// - `code`: Language code to validate
///
/// Output:
/// - `true` unless the code is empty, contains a path separator or NUL, or is `..`
///
/// Details:
/// - Any other stem is accepted, so dictionaries like `sr@latin.yaml` load
/// - A code can never name a file outside the root directory
#[must_use]
pub fn is_valid_lang_code(code: &str) -> bool {
    !code.is_empty() && code != ".." && !code.contains(['/', '\\', '\0'])
}
