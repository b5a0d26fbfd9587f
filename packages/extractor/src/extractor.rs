//! Main extractor service that ties all components together.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use roxmltree::Document;

use crate::archive::read_document;
use crate::concepts::{read_concept_descriptions, ConceptDescriptionRecord};
use crate::error::Result;
use crate::linker::link;
use crate::registry::{create_submodel_registry, ParseContext, ParseEngine};
use crate::submodel::read_submodels;
use crate::summary::SpecSummary;
use crate::xml::{element_children, get_tag_name};
use crate::yaml::{SpecWriter, WrittenFiles, YamlSpecWriter};

/// Top-level sections that carry nothing for the schema.
const IGNORED_SECTIONS: [&str; 2] = ["assetAdministrationShells", "assets"];

/// Extract the schema of an AASX package.
///
/// # Arguments
/// * `source` - Path of the `.aasx` file
/// * `spec_number` - Number of the specification, used for naming output
///
/// # Returns
/// The summary, or `None` if the package holds no specification document
///
/// # Errors
/// Returns an error if the package cannot be read or the document is not
/// well-formed XML.
pub fn extract(source: &Path, spec_number: &str) -> Result<Option<SpecSummary>> {
    tracing::info!(source = %source.display(), spec_number, "Extracting specification");
    let file = File::open(source)?;
    extract_from_reader(BufReader::new(file), spec_number)
}

/// Extract the schema from an AASX package held by any seekable reader.
///
/// # Errors
/// See [`extract`].
pub fn extract_from_reader<R: Read + Seek>(reader: R, spec_number: &str) -> Result<Option<SpecSummary>> {
    match read_document(reader)? {
        Some(xml) => extract_from_xml(&xml, spec_number).map(Some),
        None => Ok(None),
    }
}

/// Extract the schema from the XML specification document itself.
///
/// All submodels are read before any concept description is linked, so the
/// order of the two sections in the document does not matter.
///
/// # Errors
/// Returns an error if the document is not well-formed XML.
pub fn extract_from_xml(xml: &str, spec_number: &str) -> Result<SpecSummary> {
    let doc = Document::parse(xml)?;
    let engine = ParseEngine::new(create_submodel_registry());
    let mut context = ParseContext::new();
    let mut records: Vec<ConceptDescriptionRecord> = Vec::new();

    for section in element_children(doc.root_element()) {
        match get_tag_name(section) {
            "submodels" => read_submodels(section, &mut context, &engine),
            "conceptDescriptions" => {
                records.extend(read_concept_descriptions(section, context.diagnostics_mut()));
            }
            name if IGNORED_SECTIONS.contains(&name) => {}
            other => context.warn(format!("Unconsidered document section <{other}>")),
        }
    }

    link(&mut context, &records);
    tracing::info!(
        types = context.type_count(),
        concept_descriptions = records.len(),
        "Finished reading specification"
    );

    Ok(SpecSummary::new(context.into_output(), spec_number))
}

/// Extract a package and write the result with the default YAML writer.
///
/// # Arguments
/// * `source` - Path of the `.aasx` file
/// * `target` - Output directory
/// * `spec_number` - Number of the specification, names the output files
/// * `name_prefix` - Optional prefix for all type and enumeration names
///
/// # Returns
/// The written files, or `None` if the package holds no specification document
///
/// # Errors
/// Returns an error if extraction or writing fails.
pub fn extract_and_write(
    source: &Path,
    target: &Path,
    spec_number: &str,
    name_prefix: Option<&str>,
) -> Result<Option<WrittenFiles>> {
    extract_and_write_with(&YamlSpecWriter::new(), source, target, spec_number, name_prefix)
}

/// Extract a package and hand the result to `writer`.
///
/// # Errors
/// Returns an error if extraction or writing fails.
pub fn extract_and_write_with(
    writer: &dyn SpecWriter,
    source: &Path,
    target: &Path,
    spec_number: &str,
    name_prefix: Option<&str>,
) -> Result<Option<WrittenFiles>> {
    let Some(summary) = extract(source, spec_number)? else {
        tracing::warn!(source = %source.display(), "No specification document found");
        return Ok(None);
    };
    let summary = match name_prefix {
        Some(prefix) => summary.with_name_prefix(prefix),
        None => summary,
    };
    writer.write(&summary, target).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AasElement;

    const DOCUMENT: &str = r#"<environment xmlns="https://admin-shell.io/aas/3/0">
  <conceptDescriptions>
    <conceptDescription>
      <id>https://example.com/Sensor</id>
      <description><langStringTextType><language>en</language><text>A sensor</text></langStringTextType></description>
    </conceptDescription>
  </conceptDescriptions>
  <assetAdministrationShells/>
  <submodels>
    <submodel>
      <idShort>Sensor</idShort>
      <semanticId><keys><key><type>GlobalReference</type><value>https://example.com/Sensor</value></key></keys></semanticId>
    </submodel>
  </submodels>
  <unexpected/>
</environment>"#;

    #[test]
    fn test_concepts_before_submodels_are_linked() {
        let summary = extract_from_xml(DOCUMENT, "1234").unwrap();

        let sensor = summary.find_type("Sensor").unwrap();
        assert_eq!(sensor.is_case_of(), Some("iri:https://example.com/Sensor"));
        assert_eq!(sensor.description(), Some("A sensor."));
        assert_eq!(summary.spec_number(), "1234");
    }

    #[test]
    fn test_unknown_section_is_reported() {
        let summary = extract_from_xml(DOCUMENT, "1234").unwrap();
        assert_eq!(summary.warnings(), ["Unconsidered document section <unexpected>"]);
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            extract_from_xml("<environment>", "1234"),
            Err(crate::error::ExtractorError::XmlParse(_))
        ));
    }
}
