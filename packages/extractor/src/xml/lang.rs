//! Readers for language-tagged strings.
//!
//! Two encodings occur in specification documents:
//!
//! ```xml
//! <!-- legacy -->
//! <langString lang="EN">Serial number</langString>
//! <!-- current -->
//! <langStringTextType><language>en</language><text>Serial number</text></langStringTextType>
//! ```

use std::collections::BTreeMap;

use roxmltree::Node;

use super::utils::{element_children, get_attribute, get_tag_name, text_content};
use crate::config::PREFERRED_LANGUAGE;
use crate::error::Diagnostics;
use crate::text::clean_lang_text;

/// Texts keyed by lower-cased language code.
pub type LangStrings = BTreeMap<String, String>;

/// A text selected from [`LangStrings`], with the language it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LangText {
    pub language: String,
    pub text: String,
}

/// Read the language strings below a `description`-like element.
///
/// `keys` children are tolerated silently, other unexpected children are
/// reported.
pub fn read_lang_strings(node: Node<'_, '_>, diagnostics: &mut Diagnostics) -> LangStrings {
    let mut strings = LangStrings::new();
    for child in element_children(node) {
        match get_tag_name(child) {
            "langString" => {
                let language = get_attribute(child, "lang").unwrap_or_default();
                strings.insert(language.to_lowercase(), clean_lang_text(&text_content(child)));
            }
            "langStringTextType" => read_structured_lang_string(child, &mut strings, diagnostics),
            "keys" => {}
            other => diagnostics.warn(format!("Unconsidered description entry <{other}>")),
        }
    }
    strings
}

/// Read a display name (`langStringNameType` entries).
pub fn read_display_name(node: Node<'_, '_>, diagnostics: &mut Diagnostics) -> Option<String> {
    let mut strings = LangStrings::new();
    for child in element_children(node) {
        if get_tag_name(child) == "langStringNameType" {
            read_structured_lang_string(child, &mut strings, diagnostics);
        }
    }
    pick_language(&strings)
        .map(|selected| selected.text)
        .filter(|text| !text.is_empty())
}

/// Read one `<language>`/`<text>` pair into `strings`.
pub fn read_structured_lang_string(
    node: Node<'_, '_>,
    strings: &mut LangStrings,
    diagnostics: &mut Diagnostics,
) {
    let mut language = None;
    let mut text = None;
    for child in element_children(node) {
        match get_tag_name(child) {
            "language" => language = Some(text_content(child).to_lowercase()),
            "text" => text = Some(clean_lang_text(&text_content(child))),
            other => diagnostics.warn(format!(
                "Unconsidered <{other}> in <{}>",
                get_tag_name(node)
            )),
        }
    }
    if let (Some(language), Some(text)) = (language, text) {
        strings.insert(language, text);
    }
}

/// Select the English text, else the text of the first available language.
///
/// # Examples
/// ```
/// use aasx_extractor::xml::{pick_language, LangStrings};
///
/// let mut strings = LangStrings::new();
/// strings.insert("fr".into(), "Numéro".into());
/// strings.insert("de".into(), "Nummer".into());
/// assert_eq!(pick_language(&strings).unwrap().text, "Nummer");
///
/// strings.insert("en".into(), "Number".into());
/// assert_eq!(pick_language(&strings).unwrap().text, "Number");
/// ```
pub fn pick_language(strings: &LangStrings) -> Option<LangText> {
    strings
        .get_key_value(PREFERRED_LANGUAGE)
        .or_else(|| strings.iter().next())
        .map(|(language, text)| LangText {
            language: language.clone(),
            text: text.clone(),
        })
}
