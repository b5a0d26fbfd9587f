//! Known imports.
//!
//! Some templates reuse types defined by another specification instead of
//! modeling them again. Fields carrying one of the semantic ids below refer to
//! such an imported type.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

/// A type provided by another specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct KnownImport {
    /// Project (specification) defining the type.
    pub project: &'static str,
    /// Short name of the type.
    pub type_name: &'static str,
}

const CONTACT_INFORMATIONS: &str = "IDTA_02002_ContactInformations";

const CONTACT_INFORMATION_IMPORTS: [(&str, &str); 8] = [
    (
        "iri:https://admin-shell.io/zvei/nameplate/1/0/ContactInformations",
        "ContactInformations",
    ),
    ("irdi:0173-1#02-AAQ837#007", "ContactInformations"),
    (
        "iri:https://admin-shell.io/zvei/nameplate/1/0/ContactInformations/ContactInformation",
        "ContactInformation",
    ),
    ("irdi:0173-1#01-ADR448#007", "ContactInformation"),
    (
        "iri:https://admin-shell.io/zvei/nameplate/1/0/ContactInformations/ContactInformation/Phone",
        "Phone",
    ),
    ("irdi:0173-1#02-AAQ834#005", "Fax"),
    ("irdi:0173-1#02-AAQ836#005", "Email"),
    (
        "iri:https://admin-shell.io/zvei/nameplate/1/0/ContactInformations/ContactInformation/IPCommunication/",
        "IPCommunication",
    ),
];

static KNOWN_IMPORTS: LazyLock<HashMap<&'static str, KnownImport>> = LazyLock::new(|| {
    CONTACT_INFORMATION_IMPORTS
        .into_iter()
        .map(|(semantic_id, type_name)| {
            (
                semantic_id,
                KnownImport {
                    project: CONTACT_INFORMATIONS,
                    type_name,
                },
            )
        })
        .collect()
});

/// Look up the imported type for a semantic id.
///
/// # Examples
/// ```
/// use aasx_extractor::imports::lookup;
///
/// let import = lookup("irdi:0173-1#02-AAQ836#005").unwrap();
/// assert_eq!(import.type_name, "Email");
/// assert!(lookup("irdi:0173-1#02-AAM556#002").is_none());
/// ```
#[must_use]
pub fn lookup(semantic_id: &str) -> Option<KnownImport> {
    KNOWN_IMPORTS.get(semantic_id).copied()
}

/// Whether a type name is provided by an import.
#[must_use]
pub fn is_known_type(type_name: &str) -> bool {
    KNOWN_IMPORTS.values().any(|import| import.type_name == type_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_is_reachable() {
        for (semantic_id, type_name) in CONTACT_INFORMATION_IMPORTS {
            let import = lookup(semantic_id).unwrap();
            assert_eq!(import.type_name, type_name);
            assert_eq!(import.project, CONTACT_INFORMATIONS);
        }
    }

    #[test]
    fn test_known_types() {
        assert!(is_known_type("ContactInformation"));
        assert!(is_known_type("IPCommunication"));
        assert!(!is_known_type("Nameplate"));
    }
}
