//! Second pass: the concept-description section.
//!
//! Concept descriptions carry the authoritative, often multi-language
//! definitions of the identifiers used by submodel elements. They are read
//! into records that the [linker](crate::linker) applies to the schema.

use std::collections::BTreeMap;

use roxmltree::Node;

use crate::config::PREFERRED_LANGUAGE;
use crate::error::Diagnostics;
use crate::semantic_id::{read_identifier, read_reference};
use crate::submodel::read_description;
use crate::text::clean_lang_text;
use crate::xml::{element_children, get_attribute, get_tag_name, has_element_children, text_content};

/// IEC61360 content fields that carry nothing for the schema.
const IGNORED_IEC_FIELDS: [&str; 10] = [
    "preferredName",
    "symbol",
    "shortName",
    "unit",
    "unitId",
    "value",
    "valueFormat",
    "valueList",
    "dataType",
    "levelType",
];

/// One concept description, alive only until linking completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConceptDescriptionRecord {
    /// Informational only.
    pub short_name: Option<String>,
    pub identifier: String,
    pub description: Option<String>,
    /// IEC61360 definitions keyed by lower-cased language code.
    pub iec_definitions: BTreeMap<String, String>,
    pub is_case_of: Option<String>,
    pub data_specification: Option<String>,
}

impl ConceptDescriptionRecord {
    /// The English definition, else any definition, else the direct description.
    #[must_use]
    pub fn resolved_description(&self) -> Option<&str> {
        self.iec_definitions
            .get(PREFERRED_LANGUAGE)
            .or_else(|| self.iec_definitions.values().next())
            .map(String::as_str)
            .or(self.description.as_deref())
    }
}

/// Read all concept descriptions of the `conceptDescriptions` section.
pub fn read_concept_descriptions(
    section: Node<'_, '_>,
    diagnostics: &mut Diagnostics,
) -> Vec<ConceptDescriptionRecord> {
    element_children(section)
        .filter(|node| get_tag_name(*node) == "conceptDescription")
        .map(|node| read_concept_description(node, diagnostics))
        .collect()
}

fn read_concept_description(node: Node<'_, '_>, diagnostics: &mut Diagnostics) -> ConceptDescriptionRecord {
    let mut record = ConceptDescriptionRecord::default();
    for child in element_children(node) {
        match get_tag_name(child) {
            "idShort" => record.short_name = Some(text_content(child)),
            "id" | "identification" => record.identifier = read_identifier(child, diagnostics),
            "description" => record.description = read_description(child, diagnostics),
            "embeddedDataSpecification" => read_embedded_data_specification(child, &mut record, diagnostics),
            "embeddedDataSpecifications" => {
                for spec in element_children(child) {
                    match get_tag_name(spec) {
                        "embeddedDataSpecification" => {
                            read_embedded_data_specification(spec, &mut record, diagnostics);
                        }
                        other => diagnostics.warn(format!(
                            "Unconsidered embedded data specifications entry <{other}>"
                        )),
                    }
                }
            }
            "isCaseOf" => {
                record.is_case_of = read_reference(child, diagnostics).map(|reference| reference.id);
            }
            "displayName" | "category" | "administration" => {}
            other => diagnostics.warn(format!("Unconsidered concept description field <{other}>")),
        }
    }
    record
}

fn read_embedded_data_specification(
    node: Node<'_, '_>,
    record: &mut ConceptDescriptionRecord,
    diagnostics: &mut Diagnostics,
) {
    for child in element_children(node) {
        match get_tag_name(child) {
            "dataSpecificationContent" => {
                for content in element_children(child) {
                    match get_tag_name(content) {
                        "dataSpecificationIEC61360" | "dataSpecificationIec61360" => {
                            read_iec61360(content, record, diagnostics);
                        }
                        other => diagnostics.warn(format!(
                            "Unconsidered data specification content <{other}>"
                        )),
                    }
                }
            }
            "dataSpecification" => {
                record.data_specification =
                    read_reference(child, diagnostics).map(|reference| reference.id);
            }
            other => diagnostics.warn(format!(
                "Unconsidered embedded data specification field <{other}>"
            )),
        }
    }
}

fn read_iec61360(node: Node<'_, '_>, record: &mut ConceptDescriptionRecord, diagnostics: &mut Diagnostics) {
    for child in element_children(node) {
        match get_tag_name(child) {
            "definition" => read_definition(child, record, diagnostics),
            name if IGNORED_IEC_FIELDS.contains(&name) => {}
            other => diagnostics.warn(format!("Unconsidered IEC61360 content field <{other}>")),
        }
    }
}

fn read_definition(node: Node<'_, '_>, record: &mut ConceptDescriptionRecord, diagnostics: &mut Diagnostics) {
    for entry in element_children(node) {
        let name = get_tag_name(entry);
        if name != "langString" && name != "langStringDefinitionTypeIec61360" {
            diagnostics.warn(format!("Unconsidered IEC definition entry <{name}>"));
            continue;
        }

        let (language, text) = if has_element_children(entry) {
            let mut language = None;
            let mut text = None;
            for part in element_children(entry) {
                match get_tag_name(part) {
                    "language" => language = Some(text_content(part)),
                    "text" => text = Some(text_content(part)),
                    _ => {}
                }
            }
            (language, text)
        } else {
            (
                Some(get_attribute(entry, "lang").unwrap_or_default().to_string()),
                Some(text_content(entry)),
            )
        };

        if let (Some(language), Some(text)) = (language, text) {
            record
                .iec_definitions
                .insert(language.to_lowercase(), clean_lang_text(&text));
        }
    }
}
