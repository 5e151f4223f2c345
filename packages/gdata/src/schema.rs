//! Static binding tables mapping qualified element names to typed fields.
//!
//! Each entity declares a field enum implementing [`Binding`]. The parser
//! resolves child elements through [`Binding::resolve`] and the serializer
//! walks [`Binding::ALL`] in order, so both directions share one table.
//! Anything that does not resolve goes to the entity's extension store.

use std::fmt;

use roxmltree::Node;

use crate::extension::ExtensionElement;
use crate::xml::has_qualified_name;

/// A namespace-qualified element name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub namespace: &'static str,
    pub local: &'static str,
}

impl QualifiedName {
    /// Create a qualified name.
    #[must_use]
    pub const fn new(namespace: &'static str, local: &'static str) -> Self {
        Self { namespace, local }
    }

    /// Check whether an element node carries this name.
    #[must_use]
    pub fn matches(&self, node: Node<'_, '_>) -> bool {
        has_qualified_name(node, self.namespace, self.local)
    }

    /// Create an empty element with this name.
    #[must_use]
    pub fn element(&self) -> ExtensionElement {
        ExtensionElement::new(self.local, Some(self.namespace))
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}{}", self.namespace, self.local)
    }
}

/// Field table of one entity type.
pub trait Binding: Copy + Eq + 'static {
    /// Every field, in serialization order.
    const ALL: &'static [Self];

    /// The element name this field binds to.
    fn name(self) -> QualifiedName;

    /// Resolve a child element to the field it binds to.
    fn resolve(node: Node<'_, '_>) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name().matches(node))
    }
}
