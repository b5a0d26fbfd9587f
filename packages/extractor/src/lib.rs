//! AASX Extractor - Extract a type schema from AAS submodel template packages.
//!
//! An AASX package is a zip container holding an XML document that describes
//! one or more submodel templates together with the concept descriptions of
//! the identifiers they use. This crate reads that document into a
//! cross-linked schema of types, fields and inferred enumerations.
//!
//! # Example
//!
//! ```
//! use aasx_extractor::extract_from_xml;
//! use aasx_extractor::types::AasElement;
//!
//! let xml = r#"<environment>
//!   <submodels>
//!     <submodel>
//!       <idShort>Nameplate</idShort>
//!       <submodelElements>
//!         <property><idShort>SerialNumber</idShort><valueType>xs:string</valueType></property>
//!       </submodelElements>
//!     </submodel>
//!   </submodels>
//! </environment>"#;
//!
//! let summary = extract_from_xml(xml, "02006").unwrap();
//! let nameplate = summary.main_submodel().unwrap();
//! assert_eq!(nameplate.short_name(), "Nameplate");
//! assert_eq!(nameplate.fields()[0].short_name(), "SerialNumber");
//! ```
//!
//! # Architecture
//!
//! The extractor is organized into several modules:
//!
//! - [`config`]: Configuration constants and validation
//! - [`error`]: Error types, Result alias and diagnostics
//! - [`types`]: Core data types (types, fields, enumerations)
//! - [`xml`]: XML utilities
//! - [`text`]: Text cleanup helpers
//! - [`semantic_id`]: Identifier recognition and reference reading
//! - [`registry`]: Extensible element handler system
//! - [`submodel`]: Reading of submodels and their elements
//! - [`enums`]: Enumeration inference from descriptions
//! - [`concepts`]: Reading of concept descriptions
//! - [`linker`]: Linking of concept descriptions to the schema
//! - [`imports`]: Types provided by other specifications
//! - [`summary`]: The extraction result
//! - [`archive`]: Access to the package contents
//! - [`extractor`]: Main extractor service
//! - [`yaml`]: YAML and report output
//! - [`cli`]: Command-line interface

pub mod archive;
pub mod cli;
pub mod concepts;
pub mod config;
pub mod enums;
pub mod error;
pub mod extractor;
pub mod imports;
pub mod linker;
pub mod registry;
pub mod semantic_id;
pub mod submodel;
pub mod summary;
pub mod text;
pub mod types;
pub mod xml;
pub mod yaml;

// Re-export main functions
pub use extractor::{extract, extract_and_write, extract_and_write_with, extract_from_reader, extract_from_xml};

// Re-export commonly used items
pub use config::{spec_number_from_path, validate_spec_number};
pub use error::{Diagnostics, ExtractorError, Result};
pub use summary::{SpecSummary, Statistics};
pub use types::{
    AasElement, AasEnum, AasEnumLiteral, AasField, AasType, Cardinality, EntityType, EnumKind,
    FieldKind, TypeKind,
};
pub use yaml::{SpecWriter, WrittenFiles, YamlSpecWriter};
