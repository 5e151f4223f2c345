//! `gd:feedLink`, a reference to a related feed that may inline the feed
//! itself.

use roxmltree::Node;

use crate::config::GDATA_NAMESPACE;
use crate::extension::{ExtensionElement, Extensions};
use crate::model::{bind_single, push_optional, Feed, XmlElement};
use crate::schema::QualifiedName;
use crate::xml::{element_children, get_attribute};

/// A `gd:feedLink`.
///
/// Attribute values are kept as strings; `count_hint` in particular is not
/// coerced to a number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedLink {
    pub rel: Option<String>,
    pub href: Option<String>,
    pub read_only: Option<String>,
    pub count_hint: Option<String>,
    pub feed: Option<Box<Feed>>,
    pub extensions: Extensions,
}

impl FeedLink {
    /// Create a link to a feed URL.
    #[must_use]
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Self::default()
        }
    }

    /// The count hint as a number, if it is one.
    #[must_use]
    pub fn count_hint_value(&self) -> Option<u64> {
        self.count_hint.as_deref().and_then(|c| c.trim().parse().ok())
    }

    /// Whether the linked feed is marked read-only.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only.as_deref() == Some("true")
    }
}

impl XmlElement for FeedLink {
    const NAME: QualifiedName = QualifiedName::new(GDATA_NAMESPACE, "feedLink");

    fn from_node(node: Node<'_, '_>) -> Self {
        let mut extensions = Extensions::default();
        extensions.capture_attributes(node, &["rel", "href", "readOnly", "countHint"]);
        extensions.capture_text(node);

        let mut feed = None;
        for child in element_children(node) {
            if <Feed>::NAME.matches(child) {
                bind_single(&mut feed, child, &mut extensions, |n| Box::new(Feed::from_node(n)));
            } else {
                extensions.capture_element(child);
            }
        }

        Self {
            rel: get_attribute(node, "rel"),
            href: get_attribute(node, "href"),
            read_only: get_attribute(node, "readOnly"),
            count_hint: get_attribute(node, "countHint"),
            feed,
            extensions,
        }
    }

    fn to_element(&self) -> ExtensionElement {
        let mut element = Self::NAME.element();
        element.set_optional_attribute("rel", self.rel.as_ref());
        element.set_optional_attribute("href", self.href.as_ref());
        element.set_optional_attribute("readOnly", self.read_only.as_ref());
        element.set_optional_attribute("countHint", self.count_hint.as_ref());
        push_optional(&mut element, self.feed.as_deref());
        self.extensions.apply_to(&mut element);
        element
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_count_hint_stays_a_string() {
        let xml = r#"<feedLink xmlns="http://schemas.google.com/g/2005" countHint="5"/>"#;
        let link = FeedLink::from_xml_str(xml).unwrap();

        assert_eq!(link.count_hint.as_deref(), Some("5"));
        assert_eq!(link.count_hint_value(), Some(5));
        assert!(link.href.is_none());
        assert!(link.feed.is_none());
    }

    #[test]
    fn test_attributes_and_nested_feed() {
        let xml = r#"<gd:feedLink xmlns:gd="http://schemas.google.com/g/2005" rel="http://schemas.google.com/g/2005#comments" href="http://example.com/comments" readOnly="true" countHint="two">
  <feed xmlns="http://www.w3.org/2005/Atom">
    <id>http://example.com/comments</id>
    <entry><id>http://example.com/comments/1</id></entry>
  </feed>
</gd:feedLink>"#;
        let link = FeedLink::from_xml_str(xml).unwrap();

        assert_eq!(link.href.as_deref(), Some("http://example.com/comments"));
        assert!(link.is_read_only());
        assert_eq!(link.count_hint.as_deref(), Some("two"));
        assert_eq!(link.count_hint_value(), None);

        let feed = link.feed.as_ref().unwrap();
        assert_eq!(feed.id_text(), Some("http://example.com/comments"));
        assert_eq!(feed.entries.len(), 1);
        assert!(link.extensions.is_empty());

        let reparsed = FeedLink::from_xml_str(&link.to_xml_string().unwrap()).unwrap();
        assert_eq!(reparsed, link);
    }

    #[test]
    fn test_unknown_children_are_kept() {
        let xml = r#"<feedLink xmlns="http://schemas.google.com/g/2005" href="x"><hint xmlns="urn:x">more</hint></feedLink>"#;
        let link = FeedLink::from_xml_str(xml).unwrap();
        assert_eq!(link.extensions.elements.len(), 1);
        assert_eq!(link.extensions.elements[0].text.as_deref(), Some("more"));
    }
}
