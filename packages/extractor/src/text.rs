//! Text normalization for descriptions, definitions and short names.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::config::MULTIPLICITY_MARKER;

/// Runs of two or more spaces.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static REPEATED_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("valid regex"));

/// Replace line breaks by single spaces.
pub fn remove_linebreaks(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

/// Remove all spaces and line breaks.
pub fn remove_whitespace(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, ' ' | '\n' | '\r'))
        .collect()
}

/// Clean a language-tagged text as found in descriptions and IEC61360 definitions.
///
/// Applies Unicode NFC, removes line breaks, collapses repeated spaces and
/// collapses a duplicated terminal full stop (`". ."`).
///
/// # Examples
/// ```
/// use aasx_extractor::text::clean_lang_text;
///
/// assert_eq!(clean_lang_text("Serial\n number   of the device. ."), "Serial number of the device.");
/// ```
pub fn clean_lang_text(text: &str) -> String {
    let composed: String = text.trim().nfc().collect();
    let flat = remove_linebreaks(&composed);
    REPEATED_SPACES
        .replace_all(&flat, " ")
        .replace(". .", ".")
        .trim()
        .to_string()
}

/// Normalize a description: trimmed, line breaks removed and terminated by a full stop.
///
/// Returns `None` for empty text. Applying the function to its own output
/// yields the same string.
///
/// # Examples
/// ```
/// use aasx_extractor::text::normalize_description;
///
/// assert_eq!(normalize_description("Measured value").as_deref(), Some("Measured value."));
/// assert_eq!(normalize_description("Measured value.").as_deref(), Some("Measured value."));
/// assert_eq!(normalize_description("  "), None);
/// ```
pub fn normalize_description(text: &str) -> Option<String> {
    let flat = remove_linebreaks(text);
    let trimmed = flat.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.ends_with('.') {
        Some(trimmed.to_string())
    } else {
        Some(format!("{trimmed}."))
    }
}

/// Split the multiplicity marker off a short name.
///
/// # Examples
/// ```
/// use aasx_extractor::text::split_multiplicity;
///
/// assert_eq!(split_multiplicity("Marking{00}"), ("Marking".to_string(), true));
/// assert_eq!(split_multiplicity("Marking"), ("Marking".to_string(), false));
/// ```
pub fn split_multiplicity(short_name: &str) -> (String, bool) {
    let trimmed = short_name.trim();
    match trimmed.strip_suffix(MULTIPLICITY_MARKER) {
        Some(base) => (base.to_string(), true),
        None => (trimmed.to_string(), false),
    }
}

/// Whether a short name is a reserved wildcard such as `{arbitrary}` or `<noIdShort>`.
pub fn is_generic_short_name(short_name: &str) -> bool {
    short_name == "{arbitrary}"
        || short_name == "{Variable}"
        || short_name.starts_with("{Local")
        || (short_name.starts_with('{') && short_name.ends_with('}'))
        || remove_whitespace(short_name).eq_ignore_ascii_case("<noidshort>")
}

/// Turn free text into an identifier by replacing non-alphanumerics with `_`.
pub fn to_identifier(text: &str) -> String {
    let mut result: String = text
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if result.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}

/// Split a pipe-delimited example value into its parts.
///
/// # Examples
/// ```
/// use aasx_extractor::text::split_example_values;
///
/// assert_eq!(split_example_values("1 | 2|3 "), vec!["1", "2", "3"]);
/// assert!(split_example_values("  ").is_empty());
/// ```
pub fn split_example_values(data: &str) -> Vec<String> {
    if data.trim().is_empty() {
        return Vec::new();
    }
    data.split('|').map(|part| part.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_linebreaks() {
        assert_eq!(remove_linebreaks("a\r\nb\nc\rd"), "a b c d");
    }

    #[test]
    fn test_clean_lang_text_composes_unicode() {
        // "e" followed by a combining acute accent
        assert_eq!(clean_lang_text("Cafe\u{301}"), "Caf\u{e9}");
    }

    #[test]
    fn test_normalize_description_is_idempotent() {
        let once = normalize_description("Line one\nline two").unwrap();
        assert_eq!(once, "Line one line two.");
        assert_eq!(normalize_description(&once).unwrap(), once);
    }

    #[test]
    fn test_split_multiplicity_only_strips_suffix() {
        assert_eq!(split_multiplicity("{00}Foo"), ("{00}Foo".to_string(), false));
        assert_eq!(split_multiplicity(" Foo{00} "), ("Foo".to_string(), true));
    }

    #[test]
    fn test_is_generic_short_name() {
        assert!(is_generic_short_name("{arbitrary}"));
        assert!(is_generic_short_name("{Variable}"));
        assert!(is_generic_short_name("{LocalName"));
        assert!(is_generic_short_name("{SomethingElse}"));
        assert!(is_generic_short_name("< no IdShort >"));
        assert!(!is_generic_short_name("SerialNumber"));
    }

    #[test]
    fn test_to_identifier() {
        assert_eq!(to_identifier("Type A - 1"), "Type_A___1");
        assert_eq!(to_identifier("3D"), "_3D");
    }

    #[test]
    fn test_split_example_values_single() {
        assert_eq!(split_example_values("ABC-123"), vec!["ABC-123"]);
    }
}
