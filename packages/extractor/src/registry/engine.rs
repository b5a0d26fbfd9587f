//! Parse engine that orchestrates element parsing using the registry.

use roxmltree::Node;

use super::core::ElementRegistry;
use super::types::{ParseContext, TypeRef};
use crate::error::{ExtractorError, Result};
use crate::xml::get_tag_name;

/// Engine that dispatches submodel elements to their registered handlers.
///
/// Unknown elements yield an `UnknownElement` error from [`ParseEngine::parse`].
/// During recursion such errors are recorded as diagnostics and the element
/// is skipped, so an unexpected element never aborts an extraction.
pub struct ParseEngine {
    registry: ElementRegistry,
}

impl ParseEngine {
    /// Create a new engine with the given registry.
    #[must_use]
    pub fn new(registry: ElementRegistry) -> Self {
        Self { registry }
    }

    /// Parse one submodel element into `parent`.
    ///
    /// # Errors
    /// Returns `UnknownElement` if the element has no handler.
    pub fn parse(&self, node: Node<'_, '_>, context: &mut ParseContext, parent: TypeRef) -> Result<()> {
        let tag_name = get_tag_name(node);

        if let Some(handler) = self.registry.get_handler(tag_name) {
            tracing::trace!(tag = tag_name, element_type = ?handler.element_type(), "Dispatching element");

            // Recursion records errors as diagnostics and continues
            let recurse = |child: Node<'_, '_>, ctx: &mut ParseContext, owner: TypeRef| {
                self.parse_lenient(child, ctx, owner);
            };

            handler.handle(node, context, parent, &recurse);
            return Ok(());
        }

        let parent_context = node
            .parent_element()
            .map(|p| format!("<{}>", get_tag_name(p)));
        Err(ExtractorError::UnknownElement {
            tag_name: tag_name.to_string(),
            context: parent_context,
        })
    }

    /// Parse one submodel element, recording failures as diagnostics.
    pub fn parse_lenient(&self, node: Node<'_, '_>, context: &mut ParseContext, parent: TypeRef) {
        if let Err(err) = self.parse(node, context, parent) {
            context.warn(format!("Unconsidered submodel element: {err}"));
        }
    }
}
