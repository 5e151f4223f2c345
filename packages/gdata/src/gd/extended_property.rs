//! `gd:extendedProperty`, a named value or an opaque XML blob attached to
//! an entry.

use roxmltree::Node;

use crate::config::GDATA_NAMESPACE;
use crate::error::Result;
use crate::extension::{ExtensionElement, Extensions};
use crate::model::XmlElement;
use crate::schema::QualifiedName;
use crate::xml::{element_children, get_attribute};

/// A `gd:extendedProperty`.
///
/// The blob form keeps arbitrary XML as the single child element, held in
/// the extension store so it is written back as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedProperty {
    pub name: Option<String>,
    pub value: Option<String>,
    pub extensions: Extensions,
}

impl ExtendedProperty {
    /// Create a property with a name and no value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set a simple string value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Replace the property's child elements with a parsed XML fragment.
    ///
    /// # Errors
    /// A parse error when `fragment` is not well-formed; the property is
    /// left unchanged.
    ///
    /// # Examples
    /// ```
    /// use gdata_binding::gd::ExtendedProperty;
    ///
    /// let mut property = ExtendedProperty::new("settings");
    /// property.set_xml_blob(r#"<some_xml attr="test"/>"#).unwrap();
    ///
    /// let blob = property.xml_blob_extension_element().unwrap();
    /// assert_eq!(blob.tag, "some_xml");
    /// assert_eq!(blob.attribute("attr"), Some("test"));
    /// ```
    pub fn set_xml_blob(&mut self, fragment: &str) -> Result<()> {
        let blob = ExtensionElement::from_xml_str(fragment)?;
        tracing::debug!(blob = %blob.qualified_name(), "setting extended property blob");
        self.extensions.elements = vec![blob];
        Ok(())
    }

    /// The blob element, if one is present.
    #[must_use]
    pub fn xml_blob_extension_element(&self) -> Option<&ExtensionElement> {
        self.extensions.elements.first()
    }

    /// The blob serialized as a fragment, if one is present.
    pub fn xml_blob_string(&self) -> Result<Option<String>> {
        self.xml_blob_extension_element()
            .map(ExtensionElement::to_xml_string)
            .transpose()
    }
}

impl XmlElement for ExtendedProperty {
    const NAME: QualifiedName = QualifiedName::new(GDATA_NAMESPACE, "extendedProperty");

    fn from_node(node: Node<'_, '_>) -> Self {
        let mut extensions = Extensions::default();
        extensions.capture_attributes(node, &["name", "value"]);
        extensions.capture_text(node);
        for child in element_children(node) {
            extensions.capture_element(child);
        }
        Self {
            name: get_attribute(node, "name"),
            value: get_attribute(node, "value"),
            extensions,
        }
    }

    fn to_element(&self) -> ExtensionElement {
        let mut element = Self::NAME.element();
        element.set_optional_attribute("name", self.name.as_ref());
        element.set_optional_attribute("value", self.value.as_ref());
        self.extensions.apply_to(&mut element);
        element
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GDataError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blob_round_trip() {
        let mut property = ExtendedProperty::new("settings");
        property.set_xml_blob(r#"<some_xml attr="test"/>"#).unwrap();

        let xml = property.to_xml_string().unwrap();
        assert_eq!(
            xml,
            r#"<extendedProperty xmlns="http://schemas.google.com/g/2005" name="settings"><some_xml xmlns="" attr="test"/></extendedProperty>"#
        );

        let reparsed = ExtendedProperty::from_xml_str(&xml).unwrap();
        let blob = reparsed.xml_blob_extension_element().unwrap();
        assert_eq!(blob.tag, "some_xml");
        assert!(blob.namespace.is_none());
        assert_eq!(blob.attribute("attr"), Some("test"));
        assert_eq!(
            reparsed.xml_blob_string().unwrap().as_deref(),
            Some(r#"<some_xml attr="test"/>"#)
        );
        assert_eq!(reparsed, property);
    }

    #[test]
    fn test_blob_absent() {
        let property = ExtendedProperty::new("color").with_value("blue");
        assert!(property.xml_blob_extension_element().is_none());
        assert_eq!(property.xml_blob_string().unwrap(), None);
    }

    #[test]
    fn test_blob_replaces_previous_children() {
        let mut property = ExtendedProperty::new("settings");
        property.set_xml_blob("<first/>").unwrap();
        property.set_xml_blob("<second><inner>x</inner></second>").unwrap();

        assert_eq!(property.extensions.elements.len(), 1);
        let blob = property.xml_blob_extension_element().unwrap();
        assert_eq!(blob.tag, "second");
        assert_eq!(blob.children[0].text.as_deref(), Some("x"));
    }

    #[test]
    fn test_malformed_blob_leaves_property_unchanged() {
        let mut property = ExtendedProperty::new("settings");
        property.set_xml_blob("<kept/>").unwrap();
        let before = property.clone();

        let err = property.set_xml_blob("<broken").unwrap_err();
        assert!(matches!(err, GDataError::Parse(_)));
        assert_eq!(property, before);
    }

    #[test]
    fn test_parse_name_and_value() {
        let xml = r#"<gd:extendedProperty xmlns:gd="http://schemas.google.com/g/2005" name="color" value="blue"/>"#;
        let property = ExtendedProperty::from_xml_str(xml).unwrap();
        assert_eq!(property.name.as_deref(), Some("color"));
        assert_eq!(property.value.as_deref(), Some("blue"));
        assert!(property.extensions.is_empty());
    }
}
