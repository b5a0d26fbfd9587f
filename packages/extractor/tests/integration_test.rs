//! End-to-end integration tests for the extraction pipeline.
//!
//! Fixture documents are packed into AASX containers in memory and run
//! through archive scanning, both parser passes, linking and sealing.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use aasx_extractor::types::{AasElement, Cardinality, EntityType, EnumKind, FieldKind, TypeKind};
use aasx_extractor::yaml::{SpecWriter, YamlSpecWriter};
use aasx_extractor::{extract, extract_and_write, extract_from_reader, extract_from_xml, SpecSummary};
use pretty_assertions::assert_eq;
use tempfile::tempdir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

/// Pack members into an in-memory zip container.
fn package(members: &[(&str, &str)]) -> Cursor<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, content) in members {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    let mut cursor = zip.finish().unwrap();
    cursor.set_position(0);
    cursor
}

/// A conforming AASX package holding `document`.
fn aasx(document: &str) -> Cursor<Vec<u8>> {
    package(&[
        ("[Content_Types].xml", "<Types/>"),
        ("_rels/.rels", "<Relationships/>"),
        ("aasx/aasx-origin", ""),
        ("aasx/Nameplate/Nameplate.aas.xml", document),
    ])
}

fn extract_fixture(name: &str, spec_number: &str) -> SpecSummary {
    extract_from_reader(aasx(&load_fixture(name)), spec_number)
        .unwrap()
        .expect("package holds a document")
}

/// Wrap submodel elements into a minimal document.
fn document(submodels: &str, concept_descriptions: &str) -> String {
    format!(
        "<environment><submodels>{submodels}</submodels>\
         <conceptDescriptions>{concept_descriptions}</conceptDescriptions></environment>"
    )
}

#[test]
fn test_current_document_generation() {
    let summary = extract_fixture("nameplate_v3.xml", "02006");

    assert_eq!(summary.spec_number(), "02006");
    assert_eq!(summary.version(), Some("2.0"));
    let names: Vec<_> = summary.types().iter().map(|ty| ty.short_name()).collect();
    assert_eq!(names, ["Nameplate", "Markings", "Marking"]);

    let nameplate = summary.main_submodel().unwrap();
    assert_eq!(nameplate.kind(), TypeKind::Submodel);
    assert_eq!(nameplate.description(), Some("Digital nameplate of the asset."));
    assert_eq!(
        nameplate.semantic_id(),
        Some("iri:https://admin-shell.io/zvei/nameplate/2/0/Nameplate")
    );
    let fields: Vec<_> = nameplate.fields().iter().map(|field| field.short_name()).collect();
    assert_eq!(
        fields,
        [
            "ManufacturerName",
            "ManufacturerProductDesignation",
            "YearOfConstruction",
            "MarkingType",
            "Email",
            "Markings",
        ]
    );
}

#[test]
fn test_concept_description_is_linked() {
    let summary = extract_fixture("nameplate_v3.xml", "02006");
    let field = summary.main_submodel().unwrap().field("ManufacturerName").unwrap();

    assert_eq!(field.semantic_id(), Some("irdi:0173-1#02-AAO677#002"));
    assert_eq!(field.is_case_of(), Some("irdi:0173-1#02-AAO677#002"));
    assert_eq!(
        field.description(),
        Some("legally valid designation of the natural or judicial person.")
    );
    assert_eq!(field.cardinality(), Cardinality::ONE);
}

#[test]
fn test_promoted_collection_and_its_type_share_the_definition() {
    let summary = extract_fixture("nameplate_v3.xml", "02006");

    let field = summary.main_submodel().unwrap().field("Markings").unwrap();
    assert_eq!(field.kind(), FieldKind::Property);
    assert_eq!(field.value_type(), Some("Markings"));
    assert_eq!(field.cardinality(), Cardinality::ZERO_TO_ONE);
    assert_eq!(field.description(), Some("Collection of product markings."));

    let markings = summary.find_type("Markings").unwrap();
    assert_eq!(markings.kind(), TypeKind::Collection);
    assert_eq!(markings.description(), Some("Collection of product markings."));
    assert!(markings.is_case_of().is_some());
}

#[test]
fn test_multiplicity_marker() {
    let summary = extract_fixture("nameplate_v3.xml", "02006");

    let marking = summary.find_type("Marking").unwrap();
    assert!(marking.is_multi_valued());

    let field = summary.find_type("Markings").unwrap().field("Marking").unwrap();
    assert!(field.is_multi_valued());
    assert_eq!(field.cardinality(), Cardinality::ONE_TO_MANY);

    let file = marking.field("MarkingFile").unwrap();
    assert_eq!(file.kind(), FieldKind::File);
    assert_eq!(file.value_type(), Some("AasFileResourceType"));
    assert_eq!(file.example_explanation(), Some("image/png"));
}

#[test]
fn test_leaf_details() {
    let summary = extract_fixture("nameplate_v3.xml", "02006");
    let nameplate = summary.main_submodel().unwrap();

    let designation = nameplate.field("ManufacturerProductDesignation").unwrap();
    assert_eq!(designation.kind(), FieldKind::MultiLanguageText);
    assert_eq!(designation.example_values(), ["ABC-123@en"]);
    assert_eq!(designation.cardinality(), Cardinality::ZERO_TO_ONE);

    let year = nameplate.field("YearOfConstruction").unwrap();
    assert_eq!(year.value_type(), Some("xs:gYear"));
    assert_eq!(year.example_values(), ["2022", "2023"]);
    assert_eq!(year.description(), Some("Year as completion date of object."));
}

#[test]
fn test_enumeration_is_inferred() {
    let summary = extract_fixture("nameplate_v3.xml", "02006");

    let field = summary.main_submodel().unwrap().field("MarkingType").unwrap();
    assert_eq!(field.value_type(), Some("MarkingType"));
    assert_eq!(field.description(), Some("Type of the marking."));

    let en = summary.find_enum("MarkingType").unwrap();
    assert_eq!(en.kind(), EnumKind::Enum);
    let literals: Vec<_> = en.literals().iter().map(|literal| literal.name.as_str()).collect();
    assert_eq!(literals, ["CE marking", "UL mark"]);
    assert_eq!(
        en.literals()[0].semantic_id.as_deref(),
        Some("irdi:0173-1#07-AAA001#001")
    );
}

#[test]
fn test_known_import_is_resolved() {
    let summary = extract_fixture("nameplate_v3.xml", "02006");

    let email = summary.main_submodel().unwrap().field("Email").unwrap();
    assert_eq!(email.value_type(), Some("Email"));
    assert_eq!(summary.imports().len(), 1);
    assert_eq!(summary.imports()[0].type_name, "Email");
}

#[test]
fn test_unknown_element_is_skipped_with_warning() {
    let summary = extract_fixture("nameplate_v3.xml", "02006");

    assert_eq!(
        summary.warnings(),
        ["Unconsidered submodel element: No handler for element <capability> in <submodelElements>"]
    );
    let stats = summary.statistics();
    assert_eq!((stats.types, stats.fields, stats.operations, stats.enums), (3, 9, 0, 1));
}

#[test]
fn test_legacy_document_generation() {
    let summary = extract_fixture("technical_data_v2.xml", "02003");

    assert!(summary.warnings().is_empty(), "{:?}", summary.warnings());
    assert_eq!(summary.version(), Some("1"));

    let root = summary.main_submodel().unwrap();
    assert_eq!(root.short_name(), "TechnicalData");
    assert_eq!(root.description(), Some("Technical data of the product."));
    // empty semanticId falls back to the identification
    assert_eq!(
        root.semantic_id(),
        Some("iri:https://admin-shell.io/ZVEI/TechnicalData/Submodel/1/1")
    );

    let manufacturer = root.field("ManufacturerName").unwrap();
    assert_eq!(manufacturer.is_case_of(), Some("irdi:0173-1#02-AAO677#002"));
    assert_eq!(
        manufacturer.description(),
        Some("legally valid designation of the natural or judicial person.")
    );

    let general = summary.find_type("GeneralInformation").unwrap();
    assert!(general.is_ordered());
    assert!(!general.allows_duplicates());
    assert_eq!(general.description(), Some("General information about the product."));

    let component = summary.find_type("Component").unwrap();
    assert_eq!(component.kind(), TypeKind::Entity);
    assert_eq!(component.entity_type(), Some(EntityType::SelfManagedEntity));
    let temperature = component.field("Temperature").unwrap();
    assert_eq!(temperature.kind(), FieldKind::Range);
    assert_eq!(temperature.value_type(), Some("AasRangeType"));

    let operation = root.field("Recalibrate").unwrap();
    assert_eq!(operation.kind(), FieldKind::Operation);
    assert_eq!(summary.statistics().operations, 1);
}

#[test]
fn test_legacy_numbered_enumeration() {
    let summary = extract_fixture("technical_data_v2.xml", "02003");

    let product_type = summary
        .find_type("GeneralInformation")
        .unwrap()
        .field("ProductType")
        .unwrap();
    assert_eq!(product_type.value_type(), Some("ProductType"));
    assert_eq!(product_type.description(), Some("Kind of product."));

    let en = summary.find_enum("ProductType").unwrap();
    assert_eq!(en.kind(), EnumKind::EnumEntries);
    let literals: Vec<_> = en.literals().iter().map(|literal| literal.name.as_str()).collect();
    assert_eq!(literals, ["Pump", "Valve", "Motor"]);
}

#[test]
fn test_measured_value_is_linked() {
    let xml = document(
        "<submodel><idShort>Sensor</idShort><submodelElements>\
           <property><idShort>Value</idShort>\
             <semanticId><keys><key><type>ConceptDescription</type><value>https://example.com/ids/cd/Value</value></key></keys></semanticId>\
             <valueType>xs:double</valueType>\
           </property>\
         </submodelElements></submodel>",
        "<conceptDescription><id>https://example.com/ids/cd/Value</id>\
           <embeddedDataSpecifications><embeddedDataSpecification><dataSpecificationContent>\
             <dataSpecificationIec61360><definition>\
               <langStringDefinitionTypeIec61360><language>en</language><text>Measured value</text></langStringDefinitionTypeIec61360>\
             </definition></dataSpecificationIec61360>\
           </dataSpecificationContent></embeddedDataSpecification></embeddedDataSpecifications>\
         </conceptDescription>",
    );
    let summary = extract_from_xml(&xml, "1").unwrap();

    assert_eq!(summary.types().len(), 1);
    let sensor = &summary.types()[0];
    assert_eq!(sensor.fields().len(), 1);
    let value = &sensor.fields()[0];
    assert_eq!(value.description(), Some("Measured value."));
    assert_eq!(value.is_case_of(), Some("iri:https://example.com/ids/cd/Value"));
}

#[test]
fn test_duplicate_types_are_discarded() {
    let xml = document(
        "<submodel><idShort>Sensor</idShort><submodelElements>\
           <property><idShort>First</idShort></property>\
         </submodelElements></submodel>\
         <submodel><idShort>Sensor</idShort><submodelElements>\
           <property><idShort>Second</idShort></property>\
         </submodelElements></submodel>",
        "",
    );
    let summary = extract_from_xml(&xml, "1").unwrap();

    let sensors: Vec<_> = summary
        .types()
        .iter()
        .filter(|ty| ty.short_name() == "Sensor")
        .collect();
    assert_eq!(sensors.len(), 1);
    assert!(sensors[0].field("First").is_some());
}

#[test]
fn test_cardinality_defaults_to_one() {
    let xml = document(
        "<submodel><idShort>Sensor</idShort><submodelElements>\
           <property><idShort>Plain</idShort><valueType>xs:int</valueType></property>\
           <property><idShort>Many</idShort><valueType>xs:int</valueType>\
             <qualifiers><qualifier><type>Cardinality</type><value>ZeroToMany</value></qualifier></qualifiers>\
           </property>\
           <property><idShort>Unknown</idShort><valueType>xs:int</valueType>\
             <qualifiers><qualifier><type>Cardinality</type><value>Several</value></qualifier></qualifiers>\
           </property>\
         </submodelElements></submodel>",
        "",
    );
    let summary = extract_from_xml(&xml, "1").unwrap();
    let sensor = summary.main_submodel().unwrap();

    assert_eq!(sensor.field("Plain").unwrap().cardinality(), Cardinality::ONE);
    assert_eq!(sensor.field("Many").unwrap().cardinality(), Cardinality::ZERO_TO_MANY);
    assert_eq!(sensor.field("Unknown").unwrap().cardinality(), Cardinality::ONE);
    assert_eq!(summary.warnings(), ["Unconsidered cardinality: Several"]);
}

#[test]
fn test_local_remark_survives_linking() {
    let concept = "<conceptDescription><id>urn:example:value</id>\
           <description><langStringTextType><language>en</language><text>Measured value</text></langStringTextType></description>\
         </conceptDescription>";
    let xml = document(
        "<submodel><idShort>Sensor</idShort><submodelElements>\
           <property><idShort>Noted</idShort><valueType>xs:int</valueType>\
             <semanticId><keys><key><type>GlobalReference</type><value>urn:example:value</value></key></keys></semanticId>\
             <description><langStringTextType><language>en</language><text>Note: given in mm</text></langStringTextType></description>\
           </property>\
           <property><idShort>Authored</idShort><valueType>xs:int</valueType>\
             <semanticId><keys><key><type>GlobalReference</type><value>urn:example:value</value></key></keys></semanticId>\
             <description><langStringTextType><language>en</language><text>Locally authored text</text></langStringTextType></description>\
           </property>\
         </submodelElements></submodel>",
        &format!("{concept}{concept}"),
    );
    let summary = extract_from_xml(&xml, "1").unwrap();
    let sensor = summary.main_submodel().unwrap();

    // The second, identical record leaves the merged description unchanged
    assert_eq!(
        sensor.field("Noted").unwrap().description(),
        Some("Measured value Note: given in mm.")
    );
    assert_eq!(
        sensor.field("Authored").unwrap().description(),
        Some("Locally authored text.")
    );
    assert_eq!(sensor.field("Authored").unwrap().is_case_of(), Some("urn:example:value"));
}

#[test]
fn test_package_without_document() {
    let cursor = package(&[
        ("[Content_Types].xml", "<Types/>"),
        ("aasx/aasx-origin", ""),
        ("docs/readme.xml", "<readme/>"),
    ]);

    assert!(extract_from_reader(cursor, "1").unwrap().is_none());
}

#[test]
fn test_extract_from_file_and_write() {
    let temp_dir = tempdir().unwrap();
    let spec_dir = temp_dir.path().join("2006");
    fs::create_dir(&spec_dir).unwrap();
    let source = spec_dir.join("Nameplate.aasx");
    fs::write(&source, aasx(&load_fixture("nameplate_v3.xml")).into_inner()).unwrap();

    let summary = extract(&source, "2006").unwrap().unwrap();
    assert_eq!(summary.types().len(), 3);

    let output = temp_dir.path().join("out");
    let written = extract_and_write(&source, &output, "2006", Some("Idta"))
        .unwrap()
        .unwrap();
    let yaml = fs::read_to_string(&written.schema).unwrap();
    assert!(yaml.starts_with("---\n"));
    assert!(yaml.contains("short_name: IdtaNameplate"));
    assert!(yaml.contains("value_type: IdtaMarkings"));
    let report = fs::read_to_string(&written.report).unwrap();
    assert!(report.contains("IdtaNameplate (submodel)"));
}

#[test]
fn test_writer_can_be_reused() {
    let temp_dir = tempdir().unwrap();
    let writer = YamlSpecWriter::with_date("2026-01-01");
    let first = extract_fixture("nameplate_v3.xml", "02006");
    let second = extract_fixture("technical_data_v2.xml", "02003");

    let a = writer.write(&first, temp_dir.path()).unwrap();
    let b = writer.write(&second, temp_dir.path()).unwrap();

    assert_ne!(a.schema, b.schema);
    assert!(a.schema.exists() && b.schema.exists());
}

#[test]
fn test_malformed_document_aborts() {
    let result = extract_from_reader(aasx("<environment><submodels>"), "1");
    assert!(matches!(result, Err(aasx_extractor::ExtractorError::XmlParse(_))));
}
