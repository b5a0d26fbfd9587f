//! Leaf element handlers.
//!
//! Every leaf element (property, file, range, ...) is read into one field of
//! its parent by the shared field reader.

use roxmltree::Node;

use crate::registry::handler::{ElementHandler, RecurseFn};
use crate::registry::types::{ElementType, ParseContext, TypeRef};
use crate::submodel::read_field;
use crate::types::{AasField, FieldKind};
use crate::xml::text_content;

/// Hook for element children the shared field reader does not know.
///
/// Returns `true` if the child was consumed.
pub type FieldHook = fn(&mut AasField, Node<'_, '_>, &str) -> bool;

/// Handler reading an element into one field of a fixed kind.
pub struct LeafHandler {
    kind: FieldKind,
    value_type: Option<&'static str>,
    hook: Option<FieldHook>,
}

impl LeafHandler {
    /// Create a handler; `value_type` overrides any `valueType` child.
    #[must_use]
    pub const fn new(kind: FieldKind, value_type: Option<&'static str>) -> Self {
        Self {
            kind,
            value_type,
            hook: None,
        }
    }

    #[must_use]
    pub const fn with_hook(mut self, hook: FieldHook) -> Self {
        self.hook = Some(hook);
        self
    }
}

impl ElementHandler for LeafHandler {
    fn element_type(&self) -> ElementType {
        ElementType::Leaf
    }

    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        context: &mut ParseContext,
        parent: TypeRef,
        _recurse: &RecurseFn<'a, 'input>,
    ) {
        let field = read_field(node, context, self.kind, self.value_type, self.hook);
        context.add_field(parent, field);
    }
}

/// Captures the MIME type of a file element as explanatory text.
pub fn mime_type_hook(field: &mut AasField, node: Node<'_, '_>, name: &str) -> bool {
    if name == "mimeType" || name == "contentType" {
        field.set_example_explanation(text_content(node));
        true
    } else {
        false
    }
}

/// Consumes the bounds of a range element.
pub fn range_hook(_field: &mut AasField, _node: Node<'_, '_>, name: &str) -> bool {
    matches!(name, "min" | "max")
}

/// Consumes the endpoints of a relationship element.
pub fn relationship_hook(_field: &mut AasField, _node: Node<'_, '_>, name: &str) -> bool {
    matches!(name, "first" | "second")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AasElement, AasType, TypeKind};
    use roxmltree::Document;

    fn handle(handler: &LeafHandler, xml: &str) -> (AasField, Vec<String>) {
        let doc = Document::parse(xml).unwrap();
        let mut context = ParseContext::new();
        let root = context.add_type(AasType::new("Root", TypeKind::Submodel));
        let recurse = |_: Node<'_, '_>, _: &mut ParseContext, _: TypeRef| {};
        handler.handle(doc.root_element(), &mut context, root, &recurse);

        let mut output = context.into_output();
        let field = output.types.remove(0).fields()[0].clone();
        (field, output.warnings)
    }

    #[test]
    fn test_default_value_type_wins() {
        let handler = LeafHandler::new(FieldKind::Blob, Some("AasBlobType"));
        let (field, _) = handle(
            &handler,
            "<blob><idShort>Image</idShort><valueType>xs:base64Binary</valueType></blob>",
        );
        assert_eq!(field.short_name(), "Image");
        assert_eq!(field.value_type(), Some("AasBlobType"));
        assert_eq!(field.kind(), FieldKind::Blob);
    }

    #[test]
    fn test_value_type_from_element() {
        let handler = LeafHandler::new(FieldKind::Property, None);
        let (field, _) = handle(
            &handler,
            "<property><idShort>Year</idShort><valueType>xs:int</valueType></property>",
        );
        assert_eq!(field.value_type(), Some("xs:int"));
    }

    #[test]
    fn test_mime_type_hook() {
        let handler =
            LeafHandler::new(FieldKind::File, Some("AasFileResourceType")).with_hook(mime_type_hook);
        let (field, warnings) = handle(
            &handler,
            "<file><idShort>Manual</idShort><mimeType>application/pdf</mimeType></file>",
        );
        assert_eq!(field.example_explanation(), Some("application/pdf"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unhandled_child_without_hook_warns() {
        let handler = LeafHandler::new(FieldKind::Range, Some("AasRangeType"));
        let (_, warnings) = handle(
            &handler,
            "<range><idShort>Temperature</idShort><min>0</min></range>",
        );
        assert_eq!(warnings, ["Unconsidered property entry <min> in Temperature"]);
    }
}
