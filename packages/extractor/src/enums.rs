//! Enumeration inference from field descriptions.
//!
//! Specification documents rarely model value sets explicitly. Instead the
//! description of a string-typed property lists the allowed values after a
//! marker such as `Valid values:`. Such fields get an enumeration named after
//! the field, and their value type is redirected to it.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Diagnostics;
use crate::registry::ParseContext;
use crate::semantic_id::{compose, recognize, scheme_prefix};
use crate::text::{remove_whitespace, to_identifier};
use crate::types::{AasElement, AasElementMut, AasEnum, AasEnumLiteral, AasField, EnumKind};

/// Descriptions declaring that further values may be used.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static OPEN_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"declared as.*open.*for further addition|usage of values that are not given")
        .expect("valid regex")
});

/// A numbered, quoted literal: `2. "Screwed"` or `and 3. "Welded".`
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMBERED_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(and\W+)?\d+\.\W*"([^"]+)"(\.)?$"#).expect("valid regex"));

/// Number of words of a literal description used as literal name.
const LITERAL_NAME_WORDS: usize = 5;

/// Bullet as left behind by text processors (private-use Symbol font glyph).
const BULLET: char = '\u{F0B7}';

fn markers(kind: EnumKind) -> &'static [&'static str] {
    match kind {
        EnumKind::Enum => &["Valid values:", "Allowed values:"],
        EnumKind::EnumEntries => &["Possible values:", "Possible values are:"],
        EnumKind::ValueList => &["Value list:", "List of values:"],
        EnumKind::Irdis => &["Values:"],
    }
}

/// Split `data` at the first marker of `kind` into the text before and after it.
fn find_marker(kind: EnumKind, data: &str) -> Option<(&str, &str)> {
    markers(kind).iter().find_map(|marker| {
        data.find(marker)
            .map(|pos| (data[..pos].trim(), &data[pos + marker.len()..]))
    })
}

/// Infer an enumeration from `description` and redirect the field's value type to it.
///
/// Only fields with a generic value type are considered. Every kind is tried
/// in turn on the text following the previous match. The first match creates
/// the enumeration from everything after its marker; later matches only move
/// the split point. Returns the description that remains for the field: the
/// text before the last marker, or `description` unchanged if there is none.
pub fn infer_enum(field: &mut AasField, description: &str, context: &mut ParseContext) -> String {
    if !field.has_generic_value_type() || field.short_name().is_empty() {
        return description.to_string();
    }

    let open = OPEN_DECLARATION.is_match(description);
    let mut remaining = description;
    let mut data = description;
    for kind in EnumKind::ALL {
        if let Some((head, rest)) = find_marker(kind, data) {
            remaining = head;
            data = rest;
            add_enum(field, kind, head, rest, open, context);
        }
    }
    remaining.to_string()
}

/// Create the enumeration named after `field` unless it exists, and type the field with it.
fn add_enum(
    field: &mut AasField,
    kind: EnumKind,
    head: &str,
    rest: &str,
    open: bool,
    context: &mut ParseContext,
) {
    let name = field.short_name().to_string();
    if !context.has_enum(&name) {
        let mut en = AasEnum::new(&name, kind);
        en.set_open(open);
        let base = en.base_mut();
        base.set_semantic_id(field.semantic_id().map(str::to_string));
        base.set_description(&filter_language(head));

        let diagnostics = context.diagnostics_mut();
        for token in tokenize(kind, rest) {
            match kind {
                EnumKind::Enum => read_enum_literal(&token, &mut en, diagnostics),
                EnumKind::EnumEntries => read_numbered_literals(&token, &mut en),
                EnumKind::ValueList => read_value_list(&token, &mut en),
                EnumKind::Irdis => read_irdi_literals(&token, &mut en),
            }
        }

        if en.literals().is_empty() {
            context.warn(format!("No enumeration literals found in description of {name}"));
        }
        tracing::debug!(name = %name, literals = en.literals().len(), "Inferred enumeration");
        context.add_enum(en);
    }

    field.set_value_type(Some(name));
}

/// Split the literal part of a description into tokens.
///
/// Value lists are read as one token, all other kinds are split at commas
/// outside parentheses.
fn tokenize(kind: EnumKind, text: &str) -> Vec<String> {
    if kind == EnumKind::ValueList {
        return if text.trim().is_empty() { Vec::new() } else { vec![text.to_string()] };
    }

    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                tokens.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    tokens.push(current);
    tokens
        .into_iter()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

/// `IRDI (Description)`, `Name (value, IRDI)` or `Name (IRDI)`.
fn read_enum_literal(token: &str, en: &mut AasEnum, diagnostics: &mut Diagnostics) {
    let (Some(open), Some(close)) = (token.find('('), token.find(')')) else {
        diagnostics.warn(format!("Unknown enum literal structure: {token}"));
        return;
    };
    if open == 0 || open > close {
        diagnostics.warn(format!("Unknown enum literal structure: {token}"));
        return;
    }

    let before = token[..open].trim();
    let inner = &token[open + 1..close];
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();

    if let Some(prefix) = scheme_prefix(&remove_whitespace(before)) {
        let name = literal_name(inner);
        let identifier = name.split_once(" - ").map(|(id, _)| to_identifier(id));
        let mut literal = AasEnumLiteral::new(name)
            .with_semantic_id(compose(prefix, &remove_whitespace(before)));
        literal.description = Some(inner.trim().to_string());
        literal.identifier = identifier;
        en.push_literal(literal);
        return;
    }

    let id_part = match parts.as_slice() {
        [value, id] => scheme_prefix(&remove_whitespace(id)).map(|prefix| (Some(*value), prefix, *id)),
        [id] => scheme_prefix(&remove_whitespace(id)).map(|prefix| (None, prefix, *id)),
        _ => None,
    };
    match id_part {
        Some((value, prefix, id)) => {
            let mut literal =
                AasEnumLiteral::new(before).with_semantic_id(compose(prefix, &remove_whitespace(id)));
            literal.value = value.map(str::to_string);
            en.push_literal(literal);
        }
        None => diagnostics.warn(format!("Unknown enum literal structure: {token}")),
    }
}

/// First words of a literal description.
fn literal_name(description: &str) -> String {
    description
        .split(' ')
        .take(LITERAL_NAME_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// `1. "A"` or `2. "B" and 3. "C".`
fn read_numbered_literals(token: &str, en: &mut AasEnum) {
    let token = token.replace(['\u{201C}', '\u{201D}'], "\"");
    let token = token.trim();
    match token.find("\" and") {
        Some(pos) => {
            push_numbered_literal(token[..=pos].trim(), en);
            let last = token[pos + 1..].trim();
            let last = match last.find("\".") {
                Some(end) => &last[..end + 2],
                None => last,
            };
            push_numbered_literal(last, en);
        }
        None => push_numbered_literal(token, en),
    }
}

fn push_numbered_literal(token: &str, en: &mut AasEnum) {
    if let Some(captures) = NUMBERED_LITERAL.captures(token) {
        en.push_literal(AasEnumLiteral::new(&captures[2]));
    }
}

/// `Name - IRDI` pairs, possibly several in one token.
fn read_irdi_literals(token: &str, en: &mut AasEnum) {
    let mut rest = token.replace('\u{2013}', "-");
    while let Some(pos) = rest.find('-').filter(|&pos| pos > 0) {
        let name = rest[..pos].trim().to_string();
        let tail = rest[pos + 1..].trim().to_string();
        rest = match recognize(&tail, false, false) {
            Some(id) => {
                if let Some(prefix) = scheme_prefix(&id) {
                    en.push_literal(AasEnumLiteral::new(name).with_semantic_id(compose(prefix, &id)));
                }
                tail.get(id.len()..).unwrap_or_default().to_string()
            }
            None => tail,
        };
    }
}

/// Bulleted items, else `Name [..] IRDI` entries.
fn read_value_list(text: &str, en: &mut AasEnum) {
    if text.find(BULLET).is_some_and(|pos| pos > 0) {
        for item in text.split(BULLET).map(str::trim).filter(|item| !item.is_empty()) {
            en.push_literal(value_list_literal(item, None));
        }
        return;
    }

    let mut rest = text;
    while let Some(open) = rest.find('[').filter(|&pos| pos > 0) {
        let Some(close) = rest[open..].find(']').map(|pos| open + pos) else {
            break;
        };
        let name = rest[..open].trim();
        let tail = rest[close + 1..].trim_start();
        let Some((id, prefix)) = recognize(tail, false, false)
            .and_then(|id| scheme_prefix(&id).map(|prefix| (id, prefix)))
        else {
            break;
        };
        en.push_literal(value_list_literal(name, Some(compose(prefix, &id))));
        rest = tail.get(id.len()..).unwrap_or_default();
    }
}

/// A value-list entry; `ID  Name` (two blanks) carries an identifier.
fn value_list_literal(text: &str, semantic_id: Option<String>) -> AasEnumLiteral {
    let mut literal = match text.split_once("  ") {
        Some((identifier, name)) => {
            let mut literal = AasEnumLiteral::new(name.trim());
            literal.identifier = Some(identifier.trim().to_string());
            literal
        }
        None => AasEnumLiteral::new(text.trim()),
    };
    literal.semantic_id = semantic_id;
    literal
}

/// Select the English part of a text carrying `@lang` sections.
///
/// `definition @en` style markers are preferred over `preferredName @en`.
fn filter_language(text: &str) -> String {
    if !text.contains('@') {
        return text.to_string();
    }
    let masked = if text.contains("definition @") || text.contains("Definition @") {
        text.replace("preferredName @", "")
            .replace("definition @", "@")
            .replace("Definition @", "@")
    } else {
        text.to_string()
    };

    let mut english = None;
    let mut other = None;
    for part in masked.split('@').skip(1) {
        let Some((language, content)) = part.split_once(' ') else {
            continue;
        };
        let language = language.trim_end_matches(':');
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_lowercase()) {
            continue;
        }
        if language == "en" {
            english = Some(content.trim().to_string());
        } else {
            other = Some(content.trim().to_string());
        }
    }
    english.or(other).unwrap_or_else(|| text.to_string())
}
