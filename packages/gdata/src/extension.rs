//! Storage for XML content that no typed field claims.
//!
//! [`ExtensionElement`] is an owned recursive tree that can represent any
//! element. [`Extensions`] is the per-container store every typed element
//! carries for its unknown attributes, unknown children and free text, so a
//! parse → serialize cycle never drops content.

use std::collections::BTreeMap;

use roxmltree::{Document, Node};

use crate::config::WriteOptions;
use crate::error::Result;
use crate::xml::{
    attribute_key, collect_text, display_name, element_children, get_namespace, get_tag_name,
    write_element,
};

/// A generic XML element: tag, namespace, attributes, children and text.
///
/// Attribute names are plain for unqualified attributes and `{namespace}local`
/// for qualified ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionElement {
    pub tag: String,
    pub namespace: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<ExtensionElement>,
    pub text: Option<String>,
}

impl ExtensionElement {
    /// Create an empty element.
    #[must_use]
    pub fn new(tag: impl Into<String>, namespace: Option<&str>) -> Self {
        Self {
            tag: tag.into(),
            namespace: namespace.map(str::to_string),
            ..Self::default()
        }
    }

    /// Set the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Append a child element.
    #[must_use]
    pub fn with_child(mut self, child: ExtensionElement) -> Self {
        self.children.push(child);
        self
    }

    /// Set an attribute when a value is present.
    pub fn set_optional_attribute(&mut self, name: &str, value: Option<&String>) {
        if let Some(value) = value {
            self.attributes.insert(name.to_string(), value.clone());
        }
    }

    /// Get an attribute value by its store key.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Build the tree for an element node and everything below it.
    pub fn from_node(node: Node<'_, '_>) -> Self {
        Self {
            tag: get_tag_name(node).to_string(),
            namespace: get_namespace(node).map(str::to_string),
            attributes: node
                .attributes()
                .map(|attr| (attribute_key(&attr), attr.value().to_string()))
                .collect(),
            children: element_children(node).map(Self::from_node).collect(),
            text: collect_text(node),
        }
    }

    /// Parse a standalone XML fragment into a tree.
    ///
    /// # Examples
    /// ```
    /// use gdata_binding::extension::ExtensionElement;
    ///
    /// let element = ExtensionElement::from_xml_str(r#"<some_xml attr="test"/>"#).unwrap();
    /// assert_eq!(element.tag, "some_xml");
    /// assert!(element.namespace.is_none());
    /// assert_eq!(element.attribute("attr"), Some("test"));
    /// ```
    pub fn from_xml_str(xml: &str) -> Result<Self> {
        let doc = Document::parse(xml)?;
        Ok(Self::from_node(doc.root_element()))
    }

    /// Serialize the tree as a compact fragment.
    pub fn to_xml_string(&self) -> Result<String> {
        self.to_xml_string_with(WriteOptions::compact())
    }

    /// Serialize the tree with explicit output options.
    pub fn to_xml_string_with(&self, options: WriteOptions) -> Result<String> {
        write_element(self, options)
    }

    /// Find direct children by tag and/or namespace.
    ///
    /// A `None` filter matches anything.
    pub fn find_children<'a>(
        &'a self,
        tag: Option<&'a str>,
        namespace: Option<&'a str>,
    ) -> impl Iterator<Item = &'a ExtensionElement> + 'a {
        self.children
            .iter()
            .filter(move |child| child.matches(tag, namespace))
    }

    /// Check the element against optional tag and namespace filters.
    #[must_use]
    pub fn matches(&self, tag: Option<&str>, namespace: Option<&str>) -> bool {
        tag.is_none_or(|t| self.tag == t)
            && namespace.is_none_or(|ns| self.namespace.as_deref() == Some(ns))
    }

    /// Qualified name in `{namespace}tag` form.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        display_name(self.namespace.as_deref(), &self.tag)
    }
}

/// Unknown attributes, unknown child elements and free text of one container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extensions {
    pub attributes: BTreeMap<String, String>,
    pub elements: Vec<ExtensionElement>,
    pub text: Option<String>,
}

impl Extensions {
    /// Whether nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.elements.is_empty() && self.text.is_none()
    }

    /// Find captured elements by tag and/or namespace.
    pub fn find_extensions<'a>(
        &'a self,
        tag: Option<&'a str>,
        namespace: Option<&'a str>,
    ) -> impl Iterator<Item = &'a ExtensionElement> + 'a {
        self.elements
            .iter()
            .filter(move |element| element.matches(tag, namespace))
    }

    /// Append an element to the store.
    pub fn push(&mut self, element: ExtensionElement) {
        self.elements.push(element);
    }

    /// Capture every attribute of `node` not listed in `known`.
    pub(crate) fn capture_attributes(&mut self, node: Node<'_, '_>, known: &[&str]) {
        for attr in node.attributes() {
            if attr.namespace().is_none() && known.contains(&attr.name()) {
                continue;
            }
            self.attributes
                .insert(attribute_key(&attr), attr.value().to_string());
        }
    }

    /// Capture the direct text of `node`.
    pub(crate) fn capture_text(&mut self, node: Node<'_, '_>) {
        self.text = collect_text(node);
    }

    /// Capture an unrecognized child element.
    pub(crate) fn capture_element(&mut self, node: Node<'_, '_>) {
        let element = ExtensionElement::from_node(node);
        tracing::trace!(element = %element.qualified_name(), "storing extension element");
        self.elements.push(element);
    }

    /// Merge the stored content into an element being serialized.
    ///
    /// Typed attributes win on a name clash. Stored text is used only when
    /// the typed element set none. Stored children follow typed children.
    pub(crate) fn apply_to(&self, element: &mut ExtensionElement) {
        for (name, value) in &self.attributes {
            element
                .attributes
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
        if element.text.is_none() {
            element.text.clone_from(&self.text);
        }
        element.children.extend(self.elements.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NESTED: &str = r#"<g:item xmlns:g="http://base.google.com/ns/1.0" g:type="text" rank="2">
  <g:label>Computer</g:label>
  <g:label>Laptop</g:label>
  <note>plain <b>bold</b></note>
</g:item>"#;

    #[test]
    fn test_from_xml_str_nested() {
        let element = ExtensionElement::from_xml_str(NESTED).unwrap();

        assert_eq!(element.tag, "item");
        assert_eq!(element.namespace.as_deref(), Some("http://base.google.com/ns/1.0"));
        assert_eq!(element.attribute("rank"), Some("2"));
        assert_eq!(
            element.attribute("{http://base.google.com/ns/1.0}type"),
            Some("text")
        );
        assert_eq!(element.children.len(), 3);
        assert!(element.text.is_none());
        assert_eq!(element.children[2].text.as_deref(), Some("plain"));
        assert_eq!(element.children[2].children[0].text.as_deref(), Some("bold"));
    }

    #[test]
    fn test_round_trip_preserves_content() {
        let element = ExtensionElement::from_xml_str(NESTED).unwrap();
        let reparsed = ExtensionElement::from_xml_str(&element.to_xml_string().unwrap()).unwrap();
        assert_eq!(element, reparsed);
    }

    #[test]
    fn test_round_trip_preserves_whitespace_characters() {
        let element = ExtensionElement::from_xml_str(r#"<x attr="a&#10;b&#9;c">a&#13;b</x>"#).unwrap();
        assert_eq!(element.attribute("attr"), Some("a\nb\tc"));
        assert_eq!(element.text.as_deref(), Some("a\rb"));

        let reparsed = ExtensionElement::from_xml_str(&element.to_xml_string().unwrap()).unwrap();
        assert_eq!(reparsed, element);
    }

    #[test]
    fn test_mixed_content_text_moves_before_children() {
        let element = ExtensionElement::from_xml_str("<p>Hello <b>x</b> world</p>").unwrap();
        assert_eq!(element.text.as_deref(), Some("Hello  world"));
        assert_eq!(element.children[0].text.as_deref(), Some("x"));
        assert_eq!(
            element.to_xml_string().unwrap(),
            "<p>Hello  world<b>x</b></p>"
        );
    }

    #[test]
    fn test_find_children() {
        let element = ExtensionElement::from_xml_str(NESTED).unwrap();

        assert_eq!(element.find_children(Some("label"), None).count(), 2);
        assert_eq!(
            element
                .find_children(None, Some("http://base.google.com/ns/1.0"))
                .count(),
            2
        );
        assert_eq!(element.find_children(Some("note"), None).count(), 1);
        assert_eq!(element.find_children(None, None).count(), 3);
        assert_eq!(element.find_children(Some("missing"), None).count(), 0);
    }

    #[test]
    fn test_from_xml_str_rejects_malformed() {
        assert!(ExtensionElement::from_xml_str("<open>").is_err());
    }

    #[test]
    fn test_apply_to_typed_attributes_win() {
        let mut store = Extensions::default();
        store.attributes.insert("rel".to_string(), "stale".to_string());
        store.attributes.insert("extra".to_string(), "kept".to_string());
        store.push(ExtensionElement::new("child", None));

        let mut element = ExtensionElement::new("link", None).with_attribute("rel", "self");
        store.apply_to(&mut element);

        assert_eq!(element.attribute("rel"), Some("self"));
        assert_eq!(element.attribute("extra"), Some("kept"));
        assert_eq!(element.children.len(), 1);
    }

    #[test]
    fn test_extensions_is_empty() {
        let mut store = Extensions::default();
        assert!(store.is_empty());
        store.text = Some("free text".to_string());
        assert!(!store.is_empty());
    }
}
