//! Text-valued elements: identifiers, timestamps, search metadata and
//! Atom text constructs.

use roxmltree::Node;

use crate::config::{ATOM_NAMESPACE, OPENSEARCH_NAMESPACE};
use crate::extension::{ExtensionElement, Extensions};
use crate::model::XmlElement;
use crate::schema::QualifiedName;
use crate::xml::{collect_text, element_children, get_attribute, get_text};

/// Define a known element reduced to a single text value.
///
/// With `trim = true` the stored text is the trimmed content, and
/// whitespace-only content counts as absent.
macro_rules! text_element {
    ($(#[$meta:meta])* $name:ident, $namespace:expr, $local:literal, trim = $trim:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            pub text: Option<String>,
            pub extensions: $crate::extension::Extensions,
        }

        impl $name {
            /// Create the element with the given text.
            #[must_use]
            pub fn new(text: impl Into<String>) -> Self {
                Self {
                    text: Some(text.into()),
                    extensions: $crate::extension::Extensions::default(),
                }
            }

            /// The text value, if any.
            #[must_use]
            pub fn text(&self) -> Option<&str> {
                self.text.as_deref()
            }
        }

        impl $crate::model::XmlElement for $name {
            const NAME: $crate::schema::QualifiedName =
                $crate::schema::QualifiedName::new($namespace, $local);

            fn from_node(node: ::roxmltree::Node<'_, '_>) -> Self {
                let mut extensions = $crate::extension::Extensions::default();
                extensions.capture_attributes(node, &[]);
                for child in $crate::xml::element_children(node) {
                    extensions.capture_element(child);
                }
                let text = if $trim {
                    $crate::xml::get_text(node)
                } else {
                    $crate::xml::collect_text(node)
                };
                Self { text, extensions }
            }

            fn to_element(&self) -> $crate::extension::ExtensionElement {
                let mut element = Self::NAME.element();
                element.text.clone_from(&self.text);
                self.extensions.apply_to(&mut element);
                element
            }
        }
    };
}

pub(crate) use text_element;

text_element!(
    /// Atom `id`; surrounding whitespace from pretty-printed sources is trimmed.
    Id, ATOM_NAMESPACE, "id", trim = true
);
text_element!(
    /// Atom `published` timestamp, kept as written.
    Published, ATOM_NAMESPACE, "published", trim = false
);
text_element!(
    /// Atom `updated` timestamp, kept as written.
    Updated, ATOM_NAMESPACE, "updated", trim = false
);
text_element!(Icon, ATOM_NAMESPACE, "icon", trim = false);
text_element!(Logo, ATOM_NAMESPACE, "logo", trim = false);
text_element!(
    /// OpenSearch `totalResults`.
    TotalResults, OPENSEARCH_NAMESPACE, "totalResults", trim = false
);
text_element!(
    /// OpenSearch `startIndex`.
    StartIndex, OPENSEARCH_NAMESPACE, "startIndex", trim = false
);
text_element!(
    /// OpenSearch `itemsPerPage`.
    ItemsPerPage, OPENSEARCH_NAMESPACE, "itemsPerPage", trim = false
);

macro_rules! numeric_value {
    ($($name:ident),*) => {
        $(
            impl $name {
                /// Interpret the text as a non-negative count.
                #[must_use]
                pub fn value(&self) -> Option<u64> {
                    self.text.as_deref().and_then(|t| t.trim().parse().ok())
                }
            }
        )*
    };
}

numeric_value!(TotalResults, StartIndex, ItemsPerPage);

/// Atom `generator`, naming the software that produced the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generator {
    pub text: Option<String>,
    pub uri: Option<String>,
    pub version: Option<String>,
    pub extensions: Extensions,
}

impl Generator {
    /// Create a generator with the given name.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

impl XmlElement for Generator {
    const NAME: QualifiedName = QualifiedName::new(ATOM_NAMESPACE, "generator");

    fn from_node(node: Node<'_, '_>) -> Self {
        let mut extensions = Extensions::default();
        extensions.capture_attributes(node, &["uri", "version"]);
        for child in element_children(node) {
            extensions.capture_element(child);
        }
        Self {
            text: get_text(node),
            uri: get_attribute(node, "uri"),
            version: get_attribute(node, "version"),
            extensions,
        }
    }

    fn to_element(&self) -> ExtensionElement {
        let mut element = Self::NAME.element();
        element.set_optional_attribute("uri", self.uri.as_ref());
        element.set_optional_attribute("version", self.version.as_ref());
        element.text.clone_from(&self.text);
        self.extensions.apply_to(&mut element);
        element
    }
}

/// Atom text construct (`title`, `subtitle`, `summary`, `rights`).
///
/// The element name depends on the field holding it, so it is passed in
/// when serializing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextConstruct {
    pub text: Option<String>,
    pub text_type: Option<String>,
    pub extensions: Extensions,
}

impl TextConstruct {
    /// Plain text construct.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Text construct with an explicit `type` (`text`, `html`, `xhtml`).
    #[must_use]
    pub fn typed(text: impl Into<String>, text_type: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            text_type: Some(text_type.into()),
            extensions: Extensions::default(),
        }
    }

    /// Bind a text construct element of any name.
    pub fn from_node(node: Node<'_, '_>) -> Self {
        let mut extensions = Extensions::default();
        extensions.capture_attributes(node, &["type"]);
        for child in element_children(node) {
            extensions.capture_element(child);
        }
        Self {
            text: collect_text(node),
            text_type: get_attribute(node, "type"),
            extensions,
        }
    }

    /// Build the element under the given name.
    #[must_use]
    pub fn to_named_element(&self, name: QualifiedName) -> ExtensionElement {
        let mut element = name.element();
        element.set_optional_attribute("type", self.text_type.as_ref());
        element.text.clone_from(&self.text);
        self.extensions.apply_to(&mut element);
        element
    }
}

/// Atom `content`.
///
/// Inline XHTML bodies (the `div` child) are kept in the extension store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    pub text: Option<String>,
    pub content_type: Option<String>,
    pub src: Option<String>,
    pub extensions: Extensions,
}

impl Content {
    /// Text content of the given type.
    #[must_use]
    pub fn new(text: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            content_type: Some(content_type.into()),
            ..Self::default()
        }
    }

    /// Out-of-line content pointing at a media resource.
    #[must_use]
    pub fn out_of_line(src: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            content_type: Some(content_type.into()),
            ..Self::default()
        }
    }
}

impl XmlElement for Content {
    const NAME: QualifiedName = QualifiedName::new(ATOM_NAMESPACE, "content");

    fn from_node(node: Node<'_, '_>) -> Self {
        let mut extensions = Extensions::default();
        extensions.capture_attributes(node, &["type", "src"]);
        for child in element_children(node) {
            extensions.capture_element(child);
        }
        Self {
            text: collect_text(node),
            content_type: get_attribute(node, "type"),
            src: get_attribute(node, "src"),
            extensions,
        }
    }

    fn to_element(&self) -> ExtensionElement {
        let mut element = Self::NAME.element();
        element.set_optional_attribute("type", self.content_type.as_ref());
        element.set_optional_attribute("src", self.src.as_ref());
        element.text.clone_from(&self.text);
        self.extensions.apply_to(&mut element);
        element
    }
}
