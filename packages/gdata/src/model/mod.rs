//! Typed Atom/GData elements.
//!
//! Every document-level type implements [`XmlElement`]: it binds its known
//! children through a [`Binding`](crate::schema::Binding) table and keeps the
//! rest in an [`Extensions`] store, so serializing re-emits both.

mod entry;
mod feed;
mod link;
mod text;

use roxmltree::{Document, Node};

use crate::config::WriteOptions;
use crate::error::Result;
use crate::extension::{ExtensionElement, Extensions};
use crate::schema::QualifiedName;
use crate::xml::{expect_root, write_element};

pub use entry::{Entry, EntryField};
pub use feed::{Feed, FeedField};
pub use link::{Category, Link, Person, PersonField};
pub use text::{
    Content, Generator, Icon, Id, ItemsPerPage, Logo, Published, StartIndex, TextConstruct,
    TotalResults, Updated,
};

pub(crate) use text::text_element;

/// A type bound to one qualified XML element.
pub trait XmlElement: Sized {
    /// The element this type binds.
    const NAME: QualifiedName;

    /// Bind an element node. Unknown content goes to the extension store.
    fn from_node(node: Node<'_, '_>) -> Self;

    /// Build the element tree, typed fields first, extensions after.
    fn to_element(&self) -> ExtensionElement;

    /// Parse a document whose root must be [`Self::NAME`].
    fn from_xml_str(xml: &str) -> Result<Self> {
        let doc = Document::parse(xml)?;
        let root = doc.root_element();
        expect_root(root, Self::NAME.namespace, Self::NAME.local)?;
        Ok(Self::from_node(root))
    }

    /// Serialize as a compact document.
    fn to_xml_string(&self) -> Result<String> {
        self.to_xml_string_with(WriteOptions::compact())
    }

    /// Serialize with explicit output options.
    fn to_xml_string_with(&self, options: WriteOptions) -> Result<String> {
        write_element(&self.to_element(), options)
    }
}

/// Bind a single-valued field; a repeated occurrence is kept as an extension.
pub(crate) fn bind_single<T>(
    slot: &mut Option<T>,
    node: Node<'_, '_>,
    extensions: &mut Extensions,
    parse: impl FnOnce(Node<'_, '_>) -> T,
) {
    if slot.is_some() {
        extensions.capture_element(node);
    } else {
        *slot = Some(parse(node));
    }
}

/// Claim a child for an empty slot, for use inside `parse_with` hooks.
///
/// Returns `false` for a repeated occurrence so the caller stores it as an
/// extension instead.
pub(crate) fn claim<T>(
    slot: &mut Option<T>,
    node: Node<'_, '_>,
    parse: impl FnOnce(Node<'_, '_>) -> T,
) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(parse(node));
    true
}

/// Append an optional typed child.
pub(crate) fn push_optional<T: XmlElement>(element: &mut ExtensionElement, value: Option<&T>) {
    if let Some(value) = value {
        element.children.push(value.to_element());
    }
}

/// Append every typed child of a repeated field.
pub(crate) fn push_all<T: XmlElement>(element: &mut ExtensionElement, values: &[T]) {
    element
        .children
        .extend(values.iter().map(XmlElement::to_element));
}
