//! Normalization of semantic identifiers.
//!
//! Specification documents encode identifiers in several ways:
//!
//! - legacy typed keys: `<key type="ConceptDescription" idType="IRDI">0173-1#02-AAO677#002</key>`
//! - structured keys: `<key><type>GlobalReference</type><value>https://admin-shell.io/...</value></key>`
//! - bare values that are recognizable by their shape
//!
//! All of them are resolved to one canonical string carrying a scheme prefix
//! (`irdi:` or `iri:`), e.g. `irdi:0173-1#02-AAO677#002`.

use std::sync::LazyLock;

use regex::Regex;
use roxmltree::Node;

use crate::config::{IRDI_PREFIX, IRI_PREFIX};
use crate::error::Diagnostics;
use crate::xml::{
    child_text, element_children, find_children, get_attribute, get_tag_name, has_element_children,
    text_content,
};

/// ECLASS IRDI, e.g. `0173-1#02-AAO677#002`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ECLASS_IRDI_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+-\d#\d+-[A-Z]+\d+#\d+$").expect("valid regex"));

/// IEC Common Data Dictionary IRDI, e.g. `0112/2///61987#ABA565#009`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static IEC_CDD_IRDI_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+/\d+///\d+#[A-Z0-9]+\d+.*$").expect("valid regex"));

/// URL-shaped IRI.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static URL_IRI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?|ftp|file)://[-a-zA-Z0-9+&@#/%?=~_|!:,.;]*[-a-zA-Z0-9+&@#/%=~_|]$")
        .expect("valid regex")
});

/// Reference key types that contribute a semantic id.
const VALID_KEY_TYPES: [&str; 4] = [
    "Submodel",
    "ConceptDescription",
    "GlobalReference",
    "ConceptDictionary",
];

/// Shape-based identifier recognizers.
///
/// Primary recognizers come first, the generic URL recognizer is the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recognizer {
    /// IRIs below `https://admin-shell.io/`.
    IdtaIri,
    /// IEC CDD IRDIs starting with `0112/`.
    IecCddIrdi,
    /// ECLASS IRDIs starting with `0173-`.
    EclassIrdi,
    /// Any `http(s)`, `ftp` or `file` URL.
    UrlIri,
}

impl Recognizer {
    /// All recognizers in the order they are consulted.
    pub const ALL: [Recognizer; 4] = [
        Recognizer::IdtaIri,
        Recognizer::IecCddIrdi,
        Recognizer::EclassIrdi,
        Recognizer::UrlIri,
    ];

    /// Whether this recognizer is responsible for `value`.
    #[must_use]
    pub fn handles(self, value: &str) -> bool {
        match self {
            Recognizer::IdtaIri => value.starts_with("https://admin-shell.io/"),
            Recognizer::IecCddIrdi => value.starts_with("0112/"),
            Recognizer::EclassIrdi => value.starts_with("0173-"),
            Recognizer::UrlIri => ["http://", "https://", "ftp://", "file://"]
                .iter()
                .any(|scheme| value.starts_with(scheme)),
        }
    }

    /// Canonical scheme prefix of identifiers found by this recognizer.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Recognizer::IdtaIri | Recognizer::UrlIri => IRI_PREFIX,
            Recognizer::IecCddIrdi | Recognizer::EclassIrdi => IRDI_PREFIX,
        }
    }

    /// Whether `value` is, as a whole, an identifier of this recognizer's shape.
    #[must_use]
    pub fn matches(self, value: &str) -> bool {
        match self {
            Recognizer::IdtaIri | Recognizer::UrlIri => URL_IRI_PATTERN.is_match(value),
            Recognizer::IecCddIrdi => IEC_CDD_IRDI_PATTERN.is_match(value),
            Recognizer::EclassIrdi => ECLASS_IRDI_PATTERN.is_match(value),
        }
    }

    /// Last segment of a slash-separated path of identifiers.
    fn last_of_path(self, value: &str) -> &str {
        match self {
            Recognizer::EclassIrdi => match value.rfind('/') {
                Some(pos) if pos > 0 => &value[pos + 1..],
                _ => value,
            },
            _ => value,
        }
    }

    /// Whether two whitespace-separated pieces may belong to one identifier.
    fn is_combinable(self, before: &str, after: &str) -> bool {
        match self {
            Recognizer::IecCddIrdi | Recognizer::EclassIrdi => true,
            Recognizer::IdtaIri | Recognizer::UrlIri => {
                if before.ends_with('-') {
                    true
                } else if before.chars().last().is_some_and(|c| c.is_ascii_digit()) {
                    after.starts_with('/')
                } else {
                    before.ends_with('/')
                        || after.contains('/')
                        || after.chars().count() < 10
                }
            }
        }
    }

    /// Find the identifier at the start of `value`.
    ///
    /// Identifiers split by line breaks or spaces (as happens in documents
    /// converted from text processors) are re-combined as long as the
    /// combination is still an identifier.
    fn parse(self, value: &str) -> Option<String> {
        let flat = value.replace(['\n', '\r'], " ");
        let mut pieces = flat.split(' ');
        let mut result = pieces.next()?.to_string();
        for piece in pieces {
            if self.is_combinable(&result, piece) {
                let candidate = format!("{result}{piece}");
                if self.matches(&candidate) {
                    result = candidate;
                } else {
                    break;
                }
            }
        }
        self.matches(&result).then_some(result)
    }
}

/// Compose a canonical identifier from a scheme prefix and a raw value.
#[must_use]
pub fn compose(prefix: &str, id: &str) -> String {
    format!("{prefix}{id}")
}

/// Recognize an identifier by its shape.
///
/// With `from_path`, only the last segment of a path of identifiers is
/// considered (a legacy encoding). Returns `None` if no recognizer finds an
/// identifier.
///
/// # Examples
/// ```
/// use aasx_extractor::semantic_id::recognize;
///
/// assert_eq!(recognize("0173-1#02-AAO677#002", true, false).as_deref(), Some("irdi:0173-1#02-AAO677#002"));
/// assert_eq!(recognize("Manufacturer name", true, false), None);
/// ```
#[must_use]
pub fn recognize(value: &str, add_prefix: bool, from_path: bool) -> Option<String> {
    Recognizer::ALL
        .into_iter()
        .filter(|recognizer| recognizer.handles(value))
        .find_map(|recognizer| {
            let candidate = if from_path {
                recognizer.last_of_path(value)
            } else {
                value
            };
            recognizer.parse(candidate).map(|id| {
                if add_prefix {
                    compose(recognizer.prefix(), &id)
                } else {
                    id
                }
            })
        })
}

/// Scheme prefix of the first recognizer responsible for `value`.
#[must_use]
pub fn scheme_prefix(value: &str) -> Option<&'static str> {
    Recognizer::ALL
        .into_iter()
        .find(|recognizer| recognizer.handles(value))
        .map(Recognizer::prefix)
}

/// Resolve a raw identifier and an optional scheme token to a canonical identifier.
///
/// Without a scheme the primary shape heuristic is tried first, then the
/// legacy path heuristic; if neither applies the raw value is returned
/// unchanged. `IRI` and `IRDI` schemes get their canonical prefix. Other
/// schemes are passed through and reported.
///
/// # Examples
/// ```
/// use aasx_extractor::error::Diagnostics;
/// use aasx_extractor::semantic_id::resolve;
///
/// let mut diagnostics = Diagnostics::new();
/// assert_eq!(resolve(Some("IRDI"), "0173-1#02-AAO677#002", &mut diagnostics), "irdi:0173-1#02-AAO677#002");
/// assert_eq!(resolve(Some("Custom"), "abc", &mut diagnostics), "abc");
/// assert_eq!(diagnostics.messages().len(), 1);
/// ```
pub fn resolve(scheme_hint: Option<&str>, raw_id: &str, diagnostics: &mut Diagnostics) -> String {
    let raw_id = raw_id.trim();
    match scheme_hint.map(str::trim).filter(|hint| !hint.is_empty()) {
        None => recognize(raw_id, true, false)
            .or_else(|| recognize(raw_id, true, true))
            .unwrap_or_else(|| raw_id.to_string()),
        Some("IRI") => compose(IRI_PREFIX, raw_id),
        Some("IRDI") => compose(IRDI_PREFIX, raw_id),
        Some(other) => {
            diagnostics.warn(format!("Unconsidered identifier scheme '{other}' at {raw_id}"));
            raw_id.to_string()
        }
    }
}

/// Identifier read from a reference element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedReference {
    /// The identifier of the last contributing key.
    pub id: String,
    /// Number of keys that contributed an identifier.
    pub applied: usize,
}

impl ResolvedReference {
    /// Whether more than one key contributed an identifier.
    #[must_use]
    pub fn is_multi(&self) -> bool {
        self.applied > 1
    }
}

/// Read a semantic-id-like reference (`semanticId`, `isCaseOf`, `dataSpecification`).
///
/// Returns `None` if no key contributed an identifier.
pub fn read_reference(node: Node<'_, '_>, diagnostics: &mut Diagnostics) -> Option<ResolvedReference> {
    let mut result = ResolvedReference::default();
    for keys in find_children(node, "keys") {
        for key in element_children(keys) {
            let id = if has_element_children(key) {
                read_structured_key(key, diagnostics)
            } else {
                let key_type = get_attribute(key, "type").unwrap_or_default();
                is_valid_key_type(key_type, diagnostics).then(|| read_identifier(key, diagnostics))
            };
            if let Some(id) = id.filter(|id| !id.is_empty()) {
                result.id = id;
                result.applied += 1;
            }
        }
    }
    (result.applied > 0).then_some(result)
}

/// Read an identifier element carrying an optional `idType` attribute
/// (`id`, `identification`, legacy `key`).
pub fn read_identifier(node: Node<'_, '_>, diagnostics: &mut Diagnostics) -> String {
    resolve(get_attribute(node, "idType"), &text_content(node), diagnostics)
}

fn read_structured_key(key: Node<'_, '_>, diagnostics: &mut Diagnostics) -> Option<String> {
    for child in element_children(key) {
        let name = get_tag_name(child);
        if name != "type" && name != "value" {
            diagnostics.warn(format!("Unconsidered key element <{name}>"));
        }
    }
    let key_type = child_text(key, "type")?;
    let value = child_text(key, "value")?;
    is_valid_key_type(&key_type, diagnostics).then(|| resolve(None, &value, diagnostics))
}

fn is_valid_key_type(key_type: &str, diagnostics: &mut Diagnostics) -> bool {
    let valid = VALID_KEY_TYPES.contains(&key_type);
    if !valid {
        diagnostics.warn(format!("Unconsidered semantic id key type '{key_type}'"));
    }
    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_resolve_explicit_schemes() {
        let mut diagnostics = Diagnostics::new();
        assert_eq!(
            resolve(Some("IRI"), "https://admin-shell.io/zvei/nameplate/2/0/Nameplate", &mut diagnostics),
            "iri:https://admin-shell.io/zvei/nameplate/2/0/Nameplate"
        );
        assert_eq!(
            resolve(Some("IRDI"), "0112/2///61987#ABN590#001", &mut diagnostics),
            "irdi:0112/2///61987#ABN590#001"
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_resolve_unknown_scheme_passes_through() {
        let mut diagnostics = Diagnostics::new();
        assert_eq!(resolve(Some("IdShort"), "Nameplate", &mut diagnostics), "Nameplate");
        assert_eq!(diagnostics.messages().len(), 1);
    }

    #[test]
    fn test_resolve_by_shape() {
        let mut diagnostics = Diagnostics::new();
        assert_eq!(
            resolve(None, "0173-1#02-AAO677#002", &mut diagnostics),
            "irdi:0173-1#02-AAO677#002"
        );
        assert_eq!(
            resolve(Some(""), "https://example.com/ids/cd/1234", &mut diagnostics),
            "iri:https://example.com/ids/cd/1234"
        );
        assert_eq!(
            resolve(None, "0112/2///61987#ABA565#009", &mut diagnostics),
            "irdi:0112/2///61987#ABA565#009"
        );
    }

    #[test]
    fn test_resolve_unrecognized_returns_raw() {
        let mut diagnostics = Diagnostics::new();
        assert_eq!(resolve(None, " urn:x:1 ", &mut diagnostics), "urn:x:1");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_resolve_legacy_path() {
        let mut diagnostics = Diagnostics::new();
        assert_eq!(
            resolve(None, "0173-1#01-AHF578#001/0173-1#02-AAO677#002", &mut diagnostics),
            "irdi:0173-1#02-AAO677#002"
        );
    }

    #[test]
    fn test_recognize_recombines_broken_identifiers() {
        assert_eq!(
            recognize("https://admin-shell.io/zvei/ nameplate/1/0", true, false).as_deref(),
            Some("iri:https://admin-shell.io/zvei/nameplate/1/0")
        );
        assert_eq!(
            recognize("0173-1#02-AAO677#002 is the manufacturer", false, false).as_deref(),
            Some("0173-1#02-AAO677#002")
        );
    }

    #[test]
    fn test_scheme_prefix() {
        assert_eq!(scheme_prefix("0173-1#07-AAS930#001"), Some(IRDI_PREFIX));
        assert_eq!(scheme_prefix("http://example.com/x"), Some(IRI_PREFIX));
        assert_eq!(scheme_prefix("Red"), None);
    }

    #[test]
    fn test_read_reference_legacy_keys() {
        let xml = r#"<semanticId><keys>
            <key type="ConceptDescription" local="true" idType="IRDI">0173-1#02-AAO677#002</key>
        </keys></semanticId>"#;
        let doc = Document::parse(xml).unwrap();
        let mut diagnostics = Diagnostics::new();

        let reference = read_reference(doc.root_element(), &mut diagnostics).unwrap();
        assert_eq!(reference.id, "irdi:0173-1#02-AAO677#002");
        assert!(!reference.is_multi());
    }

    #[test]
    fn test_read_reference_structured_keys() {
        let xml = r#"<semanticId><type>ExternalReference</type><keys>
            <key><type>GlobalReference</type><value>https://admin-shell.io/idta/Foo/1/0</value></key>
            <key><type>GlobalReference</type><value>0173-1#02-AAO677#002</value></key>
        </keys></semanticId>"#;
        let doc = Document::parse(xml).unwrap();
        let mut diagnostics = Diagnostics::new();

        let reference = read_reference(doc.root_element(), &mut diagnostics).unwrap();
        assert_eq!(reference.id, "irdi:0173-1#02-AAO677#002");
        assert!(reference.is_multi());
    }

    #[test]
    fn test_read_reference_invalid_key_type() {
        let xml = r#"<semanticId><keys><key type="Property" idType="IdShort">Foo</key></keys></semanticId>"#;
        let doc = Document::parse(xml).unwrap();
        let mut diagnostics = Diagnostics::new();

        assert!(read_reference(doc.root_element(), &mut diagnostics).is_none());
        assert_eq!(diagnostics.messages().len(), 1);
    }

    #[test]
    fn test_read_identifier() {
        let doc = Document::parse(r#"<identification idType="IRI">https://x.org/sm/1</identification>"#).unwrap();
        let mut diagnostics = Diagnostics::new();
        assert_eq!(
            read_identifier(doc.root_element(), &mut diagnostics),
            "iri:https://x.org/sm/1"
        );
    }
}
