//! Element handler trait definition.

use roxmltree::Node;

use super::types::{ElementType, ParseContext, TypeRef};

/// Function type for recursive processing of child elements.
///
/// Receives the child, the accumulator and the type the child belongs to.
pub type RecurseFn<'a, 'input> = dyn Fn(Node<'a, 'input>, &mut ParseContext, TypeRef) + 'a;

/// Trait for element handlers.
///
/// A handler reads one kind of submodel element and records what it finds
/// on the `parent` type in the accumulator. Nested elements are handed back
/// to the engine through `recurse`.
pub trait ElementHandler: Send + Sync {
    /// Return the type classification of this element.
    fn element_type(&self) -> ElementType;

    /// Process the element.
    ///
    /// # Arguments
    /// * `node` - The XML element to process
    /// * `context` - Accumulator of the current extraction run
    /// * `parent` - The type the element contributes to
    /// * `recurse` - Function to call for recursive child processing
    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        context: &mut ParseContext,
        parent: TypeRef,
        recurse: &RecurseFn<'a, 'input>,
    );
}
