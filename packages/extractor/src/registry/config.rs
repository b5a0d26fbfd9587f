//! Registry configuration for submodel elements.

use super::core::ElementRegistry;
use super::handlers::{
    mime_type_hook, range_hook, relationship_hook, LeafHandler, StructureHandler, WrapperHandler,
};
use crate::types::{FieldKind, TypeKind};

/// Create a registry for the submodel elements of both document generations.
///
/// Elements without a handler (capabilities, events, ...) are reported by the
/// engine and skipped.
#[must_use]
pub fn create_submodel_registry() -> ElementRegistry {
    let mut registry = ElementRegistry::new();

    // Legacy wrapper around exactly one element
    registry.register("submodelElement", WrapperHandler);

    // Structural handlers, promoted to types
    registry.register(
        "submodelElementCollection",
        StructureHandler::new(TypeKind::Collection),
    );
    registry.register("submodelElementList", StructureHandler::new(TypeKind::List));
    registry.register("entity", StructureHandler::new(TypeKind::Entity));

    // Leaf handlers
    registry.register("property", LeafHandler::new(FieldKind::Property, None));
    registry.register(
        "file",
        LeafHandler::new(FieldKind::File, Some("AasFileResourceType")).with_hook(mime_type_hook),
    );
    registry.register(
        "multiLanguageProperty",
        LeafHandler::new(FieldKind::MultiLanguageText, Some("AasMultiLangStringType")),
    );
    registry.register(
        "blob",
        LeafHandler::new(FieldKind::Blob, Some("AasBlobType")).with_hook(mime_type_hook),
    );
    registry.register("operation", LeafHandler::new(FieldKind::Operation, None));
    registry.register(
        "range",
        LeafHandler::new(FieldKind::Range, Some("AasRangeType")).with_hook(range_hook),
    );
    registry.register(
        "relationshipElement",
        LeafHandler::new(FieldKind::Relation, Some("AasRelationType")).with_hook(relationship_hook),
    );
    registry.register(
        "referenceElement",
        LeafHandler::new(FieldKind::Reference, Some("AasReferenceType")),
    );

    registry
}
