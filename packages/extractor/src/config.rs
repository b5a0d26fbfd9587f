//! Configuration constants and validation functions for the extractor.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ExtractorError, Result};

/// Directory prefix of the structural document inside an AASX package.
pub const ARCHIVE_DIR_PREFIX: &str = "aasx/";

/// File extension of the structural document inside an AASX package.
pub const DOCUMENT_EXTENSION: &str = ".xml";

/// Short-name suffix marking a multi-valued element (e.g., `Marking{00}`).
pub const MULTIPLICITY_MARKER: &str = "{00}";

/// Canonical prefix for IRI identifiers.
pub const IRI_PREFIX: &str = "iri:";

/// Canonical prefix for IRDI identifiers.
pub const IRDI_PREFIX: &str = "irdi:";

/// Specification number used when none can be derived.
pub const UNKNOWN_SPEC_NUMBER: &str = "0000";

/// Preferred language for descriptions and definitions.
pub const PREFERRED_LANGUAGE: &str = "en";

/// Description prefixes that mark a locally authored remark.
///
/// Concept-description text is only prepended to descriptions starting with
/// one of these.
pub const ANNOTATION_PREFIXES: [&str; 2] = ["Note: ", "Recommendation: "];

/// Annotation (lower-cased) stating that a type's short name is fixed.
pub const FIXED_SHORT_NAME_NOTE: &str = "note: the above idshort shall always be as stated.";

/// Text wrap width for the statistics report.
pub const TEXT_WRAP_WIDTH: usize = 100;

/// Specification number pattern: letters, digits, dashes and underscores.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SPEC_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z_-]+$").expect("valid regex"));

/// Validate a specification number.
///
/// The number ends up in output file names, so path separators and other
/// special characters are rejected.
///
/// # Examples
/// ```
/// use aasx_extractor::config::validate_spec_number;
///
/// assert!(validate_spec_number("02002").is_ok());
/// assert!(validate_spec_number("../etc").is_err());
/// ```
pub fn validate_spec_number(spec_number: &str) -> Result<()> {
    if SPEC_NUMBER_PATTERN.is_match(spec_number) {
        Ok(())
    } else {
        Err(ExtractorError::InvalidSpecNumber(spec_number.to_string()))
    }
}

/// Derive the specification number from the directory holding the source.
///
/// Specification packages are conventionally stored as
/// `<number>/<name>.aasx`. Falls back to [`UNKNOWN_SPEC_NUMBER`].
///
/// # Examples
/// ```
/// use std::path::Path;
/// use aasx_extractor::config::spec_number_from_path;
///
/// assert_eq!(spec_number_from_path(Path::new("specs/2002/Nameplate.aasx")), "2002");
/// assert_eq!(spec_number_from_path(Path::new("Nameplate.aasx")), "0000");
/// ```
pub fn spec_number_from_path(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .filter(|name| validate_spec_number(name).is_ok())
        .map_or_else(|| UNKNOWN_SPEC_NUMBER.to_string(), str::to_string)
}
