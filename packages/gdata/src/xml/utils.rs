//! XML utility functions for navigating and extracting data from DOM trees.

use roxmltree::{Attribute, Node};

use crate::error::{GDataError, Result};

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use gdata_binding::xml::get_tag_name;
///
/// let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry/></feed>"#;
/// let doc = Document::parse(xml).unwrap();
/// let entry = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(entry), "entry");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Get the namespace URI of an element, if it has one.
pub fn get_namespace<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.tag_name().namespace()
}

/// Check if a node is an element with the given namespace and local name.
pub fn has_qualified_name(node: Node<'_, '_>, namespace: &str, local: &str) -> bool {
    node.is_element() && get_tag_name(node) == local && get_namespace(node) == Some(namespace)
}

/// Find the first child element with the given namespace and local name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use gdata_binding::xml::find_child;
///
/// let xml = r#"<feed xmlns="urn:a"><id>1</id><x:id xmlns:x="urn:b">2</x:id></feed>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert_eq!(find_child(root, "urn:b", "id").unwrap().text(), Some("2"));
/// assert!(find_child(root, "urn:c", "id").is_none());
/// ```
pub fn find_child<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: &str,
    local: &str,
) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| has_qualified_name(*child, namespace, local))
}

/// Get all element children of a node.
///
/// Text nodes, comments and processing instructions are skipped.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Get the text content of a node, trimmed.
///
/// Returns `None` when the node has no text or only whitespace.
pub fn get_text(node: Node<'_, '_>) -> Option<String> {
    collect_text(node)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collect the direct text content of an element.
///
/// All direct text children are concatenated. For an element without child
/// elements the text is kept verbatim. When child elements are present the
/// text is trimmed, and whitespace-only text (indentation) yields `None`.
/// The position of text relative to child elements is not kept: writers
/// emit the collected text ahead of the children.
pub fn collect_text(node: Node<'_, '_>) -> Option<String> {
    let mut text = String::new();
    let mut has_element_children = false;

    for child in node.children() {
        if child.is_element() {
            has_element_children = true;
        } else if child.is_text() {
            if let Some(t) = child.text() {
                text.push_str(t);
            }
        }
    }

    if has_element_children {
        let trimmed = text.trim();
        return (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    (!text.is_empty()).then_some(text)
}

/// Build the store key for an attribute.
///
/// Unqualified attributes use their plain name, qualified ones the
/// `{namespace}local` form.
pub fn attribute_key(attr: &Attribute<'_, '_>) -> String {
    match attr.namespace() {
        Some(namespace) => format!("{{{namespace}}}{}", attr.name()),
        None => attr.name().to_string(),
    }
}

/// Split a store key back into namespace and local name.
///
/// # Examples
/// ```
/// use gdata_binding::xml::split_attribute_key;
///
/// assert_eq!(split_attribute_key("rel"), (None, "rel"));
/// assert_eq!(split_attribute_key("{urn:x}lang"), (Some("urn:x"), "lang"));
/// ```
pub fn split_attribute_key(key: &str) -> (Option<&str>, &str) {
    key.strip_prefix('{')
        .and_then(|rest| rest.split_once('}'))
        .map_or((None, key), |(namespace, local)| (Some(namespace), local))
}

/// Get an unqualified attribute value from a node.
pub fn get_attribute(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name).map(str::to_string)
}

/// Format an element name for error messages.
pub fn display_name(namespace: Option<&str>, local: &str) -> String {
    match namespace {
        Some(namespace) => format!("{{{namespace}}}{local}"),
        None => local.to_string(),
    }
}

/// Verify that a document root is the expected element.
pub fn expect_root(node: Node<'_, '_>, namespace: &str, local: &str) -> Result<()> {
    if has_qualified_name(node, namespace, local) {
        Ok(())
    } else {
        Err(GDataError::UnexpectedRoot {
            expected: display_name(Some(namespace), local),
            found: display_name(get_namespace(node), get_tag_name(node)),
        })
    }
}
