//! XML utility functions for navigating and extracting data from DOM trees.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use aasx_extractor::xml::get_tag_name;
///
/// let xml = r#"<aas:environment xmlns:aas="https://admin-shell.io/aas/3/0"><aas:submodels/></aas:environment>"#;
/// let doc = Document::parse(xml).unwrap();
/// let submodels = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(submodels), "submodels");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given tag name.
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find all child elements with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use aasx_extractor::xml::find_children;
///
/// let xml = r#"<keys><key>1</key><key>2</key><other/></keys>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let keys: Vec<_> = find_children(doc.root_element(), "key").collect();
/// assert_eq!(keys.len(), 2);
/// ```
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// Get all element children of a node.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Whether a node has at least one element child.
pub fn has_element_children(node: Node<'_, '_>) -> bool {
    element_children(node).next().is_some()
}

/// Get the full text content of a node, trimmed.
///
/// Unlike [`Node::text`], text of nested elements and text following
/// nested elements is included.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use aasx_extractor::xml::text_content;
///
/// let doc = Document::parse("<value> a <b>b</b> c </value>").unwrap();
/// assert_eq!(text_content(doc.root_element()), "a b c");
/// ```
pub fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Get the trimmed text content of the first child with the given tag name.
pub fn child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    find_child(node, tag).map(text_content)
}

/// Get a trimmed attribute value from a node.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name).map(str::trim)
}

/// Parse the text content of a node as a boolean (`true`, case-insensitive).
pub fn get_bool(node: Node<'_, '_>) -> bool {
    text_content(node).eq_ignore_ascii_case("true")
}
