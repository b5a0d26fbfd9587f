//! Linking of concept descriptions to the schema.
//!
//! Every record whose identifier is indexed marks the matching types, fields
//! and enumerations as a case of that identifier and merges its definition
//! into their descriptions.

use crate::concepts::ConceptDescriptionRecord;
use crate::config::ANNOTATION_PREFIXES;
use crate::registry::ParseContext;
use crate::text::normalize_description;
use crate::types::AasElementMut;

/// Apply all records to the entities indexed in `context`.
///
/// Records matching no entity are dropped silently.
pub fn link(context: &mut ParseContext, records: &[ConceptDescriptionRecord]) {
    for record in records.iter().filter(|record| !record.identifier.is_empty()) {
        let identifier = record.identifier.as_str();
        let resolved = record.resolved_description();

        let types = context.types_for(identifier).to_vec();
        let fields = context.fields_for(identifier).to_vec();
        let enums = context.enums_for(identifier).to_vec();
        tracing::debug!(
            identifier,
            types = types.len(),
            fields = fields.len(),
            enums = enums.len(),
            "Linking concept description"
        );

        for handle in types {
            if let Some(ty) = context.type_mut(handle) {
                apply(ty, identifier, resolved);
            }
        }
        for handle in fields {
            if let Some(field) = context.field_mut(handle) {
                apply(field, identifier, resolved);
            }
        }
        for handle in enums {
            if let Some(en) = context.enum_mut(handle) {
                apply(en, identifier, resolved);
            }
        }
    }
}

fn apply(element: &mut impl AasElementMut, identifier: &str, resolved: Option<&str>) {
    let merged = resolved.and_then(|text| merge_description(element.description(), text));
    let base = element.base_mut();
    base.set_is_case_of(identifier);
    if let Some(merged) = merged {
        base.set_description(&merged);
    }
}

/// Merge a concept definition into an element's description.
///
/// Returns the new description, or `None` if the existing one stays:
///
/// - no existing description: the definition is adopted;
/// - the existing description already contains the definition: unchanged;
/// - the existing description is an annotation (`Note: `, `Recommendation: `):
///   the definition is put in front of it, separated by a blank only;
/// - otherwise the locally authored description is kept.
///
/// # Examples
/// ```
/// use aasx_extractor::linker::merge_description;
///
/// assert_eq!(merge_description(None, "Measured value").as_deref(), Some("Measured value."));
/// assert_eq!(
///     merge_description(Some("Note: in mm."), "Measured value").as_deref(),
///     Some("Measured value Note: in mm.")
/// );
/// assert_eq!(merge_description(Some("Local text."), "Measured value"), None);
/// ```
#[must_use]
pub fn merge_description(existing: Option<&str>, resolved: &str) -> Option<String> {
    let normalized = normalize_description(resolved)?;
    let existing = existing.map(str::trim).unwrap_or_default();
    if existing.is_empty() {
        return Some(normalized);
    }

    let raw = resolved.trim();
    if existing == raw || existing == normalized || existing.contains(raw) || existing.contains(&normalized) {
        return None;
    }
    if ANNOTATION_PREFIXES
        .iter()
        .any(|prefix| existing.starts_with(prefix))
    {
        return normalize_description(&format!("{raw} {existing}"));
    }
    None
}
