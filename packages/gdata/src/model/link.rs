//! Atom `link`, `category` and person constructs.

use roxmltree::Node;

use crate::config::ATOM_NAMESPACE;
use crate::extension::{ExtensionElement, Extensions};
use crate::model::{bind_single, XmlElement};
use crate::schema::{Binding, QualifiedName};
use crate::xml::{collect_text, element_children, get_attribute};

/// Atom `link`: a reference to a related resource, tagged by relation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    pub href: Option<String>,
    pub rel: Option<String>,
    pub link_type: Option<String>,
    pub hreflang: Option<String>,
    pub title: Option<String>,
    pub length: Option<String>,
    pub extensions: Extensions,
}

impl Link {
    const ATTRIBUTES: &'static [&'static str] = &["href", "rel", "type", "hreflang", "title", "length"];

    /// Create a link with a relation and target.
    #[must_use]
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: Some(rel.into()),
            href: Some(href.into()),
            ..Self::default()
        }
    }

    /// Set the media type.
    #[must_use]
    pub fn with_type(mut self, link_type: impl Into<String>) -> Self {
        self.link_type = Some(link_type.into());
        self
    }

    /// Whether this link has exactly the given relation.
    #[must_use]
    pub fn has_rel(&self, rel: &str) -> bool {
        self.rel.as_deref() == Some(rel)
    }
}

impl XmlElement for Link {
    const NAME: QualifiedName = QualifiedName::new(ATOM_NAMESPACE, "link");

    fn from_node(node: Node<'_, '_>) -> Self {
        let mut extensions = Extensions::default();
        extensions.capture_attributes(node, Self::ATTRIBUTES);
        extensions.capture_text(node);
        for child in element_children(node) {
            extensions.capture_element(child);
        }
        Self {
            href: get_attribute(node, "href"),
            rel: get_attribute(node, "rel"),
            link_type: get_attribute(node, "type"),
            hreflang: get_attribute(node, "hreflang"),
            title: get_attribute(node, "title"),
            length: get_attribute(node, "length"),
            extensions,
        }
    }

    fn to_element(&self) -> ExtensionElement {
        let mut element = Self::NAME.element();
        element.set_optional_attribute("href", self.href.as_ref());
        element.set_optional_attribute("rel", self.rel.as_ref());
        element.set_optional_attribute("type", self.link_type.as_ref());
        element.set_optional_attribute("hreflang", self.hreflang.as_ref());
        element.set_optional_attribute("title", self.title.as_ref());
        element.set_optional_attribute("length", self.length.as_ref());
        self.extensions.apply_to(&mut element);
        element
    }
}

/// Atom `category`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Category {
    pub term: Option<String>,
    pub scheme: Option<String>,
    pub label: Option<String>,
    pub extensions: Extensions,
}

impl Category {
    /// Create a category with a term in a scheme.
    #[must_use]
    pub fn new(term: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            scheme: Some(scheme.into()),
            ..Self::default()
        }
    }
}

impl XmlElement for Category {
    const NAME: QualifiedName = QualifiedName::new(ATOM_NAMESPACE, "category");

    fn from_node(node: Node<'_, '_>) -> Self {
        let mut extensions = Extensions::default();
        extensions.capture_attributes(node, &["term", "scheme", "label"]);
        extensions.capture_text(node);
        for child in element_children(node) {
            extensions.capture_element(child);
        }
        Self {
            term: get_attribute(node, "term"),
            scheme: get_attribute(node, "scheme"),
            label: get_attribute(node, "label"),
            extensions,
        }
    }

    fn to_element(&self) -> ExtensionElement {
        let mut element = Self::NAME.element();
        element.set_optional_attribute("term", self.term.as_ref());
        element.set_optional_attribute("scheme", self.scheme.as_ref());
        element.set_optional_attribute("label", self.label.as_ref());
        self.extensions.apply_to(&mut element);
        element
    }
}

/// Children of an Atom person construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonField {
    Name,
    Email,
    Uri,
}

impl Binding for PersonField {
    const ALL: &'static [Self] = &[Self::Name, Self::Email, Self::Uri];

    fn name(self) -> QualifiedName {
        match self {
            Self::Name => QualifiedName::new(ATOM_NAMESPACE, "name"),
            Self::Email => QualifiedName::new(ATOM_NAMESPACE, "email"),
            Self::Uri => QualifiedName::new(ATOM_NAMESPACE, "uri"),
        }
    }
}

/// Atom person construct, used for `author` and `contributor`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    pub name: Option<String>,
    pub email: Option<String>,
    pub uri: Option<String>,
    pub extensions: Extensions,
}

impl Person {
    /// Create a person with a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Bind a person construct element of any name.
    pub fn from_node(node: Node<'_, '_>) -> Self {
        let mut person = Self::default();
        person.extensions.capture_attributes(node, &[]);
        person.extensions.capture_text(node);
        for child in element_children(node) {
            let slot = match PersonField::resolve(child) {
                Some(PersonField::Name) => &mut person.name,
                Some(PersonField::Email) => &mut person.email,
                Some(PersonField::Uri) => &mut person.uri,
                None => {
                    person.extensions.capture_element(child);
                    continue;
                }
            };
            bind_single(slot, child, &mut person.extensions, |n| {
                collect_text(n).unwrap_or_default()
            });
        }
        person
    }

    /// Build the element under the given name.
    #[must_use]
    pub fn to_named_element(&self, name: QualifiedName) -> ExtensionElement {
        let mut element = name.element();
        for field in PersonField::ALL {
            let value = match field {
                PersonField::Name => &self.name,
                PersonField::Email => &self.email,
                PersonField::Uri => &self.uri,
            };
            if let Some(value) = value {
                let mut child = field.name().element();
                if !value.is_empty() {
                    child.text = Some(value.clone());
                }
                element.children.push(child);
            }
        }
        self.extensions.apply_to(&mut element);
        element
    }
}
