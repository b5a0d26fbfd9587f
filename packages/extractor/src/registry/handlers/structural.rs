//! Structural element handlers.
//!
//! These handlers process elements that contain other submodel elements:
//! the legacy `submodelElement` wrapper and the collection, list and entity
//! kinds that are promoted to types of their own.

use roxmltree::Node;

use crate::registry::handler::{ElementHandler, RecurseFn};
use crate::registry::types::{ElementType, ParseContext, TypeRef};
use crate::submodel::read_promoted;
use crate::types::TypeKind;
use crate::xml::element_children;

/// Handler for `<submodelElement>` wrappers.
///
/// Each wrapped element contributes to the same parent.
pub struct WrapperHandler;

impl ElementHandler for WrapperHandler {
    fn element_type(&self) -> ElementType {
        ElementType::Wrapper
    }

    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        context: &mut ParseContext,
        parent: TypeRef,
        recurse: &RecurseFn<'a, 'input>,
    ) {
        for child in element_children(node) {
            recurse(child, context, parent);
        }
    }
}

/// Handler for collections, lists and entities.
///
/// The element becomes a type of the given kind; the parent gets a property
/// field whose value type is the new type's short name.
pub struct StructureHandler {
    kind: TypeKind,
}

impl StructureHandler {
    #[must_use]
    pub const fn new(kind: TypeKind) -> Self {
        Self { kind }
    }
}

impl ElementHandler for StructureHandler {
    fn element_type(&self) -> ElementType {
        ElementType::Structural
    }

    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        context: &mut ParseContext,
        parent: TypeRef,
        recurse: &RecurseFn<'a, 'input>,
    ) {
        read_promoted(node, context, parent, self.kind, recurse);
    }
}
