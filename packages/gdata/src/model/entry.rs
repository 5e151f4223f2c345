//! Atom/GData `entry`.

use roxmltree::Node;

use crate::config::{rel, ATOM_NAMESPACE};
use crate::extension::{ExtensionElement, Extensions};
use crate::links::LinkFinder;
use crate::model::{
    bind_single, push_all, push_optional, Category, Content, Id, Link, Person, Published,
    TextConstruct, Updated, XmlElement,
};
use crate::schema::{Binding, QualifiedName};
use crate::xml::element_children;

/// Known children of an entry, in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Id,
    Published,
    Updated,
    Category,
    Title,
    Summary,
    Content,
    Link,
    Author,
    Contributor,
    Rights,
}

impl Binding for EntryField {
    const ALL: &'static [Self] = &[
        Self::Id,
        Self::Published,
        Self::Updated,
        Self::Category,
        Self::Title,
        Self::Summary,
        Self::Content,
        Self::Link,
        Self::Author,
        Self::Contributor,
        Self::Rights,
    ];

    fn name(self) -> QualifiedName {
        match self {
            Self::Id => Id::NAME,
            Self::Published => Published::NAME,
            Self::Updated => Updated::NAME,
            Self::Category => Category::NAME,
            Self::Title => QualifiedName::new(ATOM_NAMESPACE, "title"),
            Self::Summary => QualifiedName::new(ATOM_NAMESPACE, "summary"),
            Self::Content => Content::NAME,
            Self::Link => Link::NAME,
            Self::Author => QualifiedName::new(ATOM_NAMESPACE, "author"),
            Self::Contributor => QualifiedName::new(ATOM_NAMESPACE, "contributor"),
            Self::Rights => QualifiedName::new(ATOM_NAMESPACE, "rights"),
        }
    }
}

/// One item of a feed.
///
/// Every field is optional; an entry without an `id` is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub id: Option<Id>,
    pub title: Option<TextConstruct>,
    pub content: Option<Content>,
    pub summary: Option<TextConstruct>,
    pub published: Option<Published>,
    pub updated: Option<Updated>,
    pub rights: Option<TextConstruct>,
    pub authors: Vec<Person>,
    pub contributors: Vec<Person>,
    pub categories: Vec<Category>,
    pub links: Vec<Link>,
    pub extensions: Extensions,
}

impl Entry {
    /// Create an empty entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entry with the given id.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(Id::new(id)),
            ..Self::default()
        }
    }

    /// Set the entry's free text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.extensions.text = Some(text.into());
        self
    }

    /// The id text, if the entry has a non-empty id.
    #[must_use]
    pub fn id_text(&self) -> Option<&str> {
        self.id.as_ref().and_then(Id::text)
    }

    /// The title text, if any.
    #[must_use]
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().and_then(|t| t.text.as_deref())
    }

    /// Free text placed directly inside the entry element.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.extensions.text.as_deref()
    }

    /// The `src` of out-of-line content, which is where media lives.
    #[must_use]
    pub fn media_url(&self) -> Option<&str> {
        self.content.as_ref().and_then(|c| c.src.as_deref())
    }

    /// Whether the entry describes a media resource.
    #[must_use]
    pub fn is_media(&self) -> bool {
        self.find_link(rel::EDIT_MEDIA).is_some()
    }

    /// Bind an entry, offering unknown children to `extra` first.
    ///
    /// `extra` returns `true` when it consumed the child; otherwise the child
    /// is stored as an extension. This is how wrapping types such as
    /// [`BatchEntry`](crate::batch::BatchEntry) bind their own elements.
    pub fn parse_with<'a, 'input>(
        node: Node<'a, 'input>,
        mut extra: impl FnMut(Node<'a, 'input>) -> bool,
    ) -> Self {
        let mut entry = Self::default();
        entry.extensions.capture_attributes(node, &[]);
        entry.extensions.capture_text(node);

        for child in element_children(node) {
            let ext = &mut entry.extensions;
            match EntryField::resolve(child) {
                Some(EntryField::Id) => bind_single(&mut entry.id, child, ext, Id::from_node),
                Some(EntryField::Published) => {
                    bind_single(&mut entry.published, child, ext, Published::from_node);
                }
                Some(EntryField::Updated) => {
                    bind_single(&mut entry.updated, child, ext, Updated::from_node);
                }
                Some(EntryField::Title) => {
                    bind_single(&mut entry.title, child, ext, TextConstruct::from_node);
                }
                Some(EntryField::Summary) => {
                    bind_single(&mut entry.summary, child, ext, TextConstruct::from_node);
                }
                Some(EntryField::Rights) => {
                    bind_single(&mut entry.rights, child, ext, TextConstruct::from_node);
                }
                Some(EntryField::Content) => {
                    bind_single(&mut entry.content, child, ext, Content::from_node);
                }
                Some(EntryField::Category) => entry.categories.push(Category::from_node(child)),
                Some(EntryField::Link) => entry.links.push(Link::from_node(child)),
                Some(EntryField::Author) => entry.authors.push(Person::from_node(child)),
                Some(EntryField::Contributor) => {
                    entry.contributors.push(Person::from_node(child));
                }
                None => {
                    if !extra(child) {
                        ext.capture_element(child);
                    }
                }
            }
        }

        entry
    }

    /// Build the entry element with `extra` known children inserted after
    /// the Atom fields and before the extensions.
    #[must_use]
    pub fn to_element_with(&self, extra: Vec<ExtensionElement>) -> ExtensionElement {
        let mut element = Self::NAME.element();
        for field in EntryField::ALL {
            match field {
                EntryField::Id => push_optional(&mut element, self.id.as_ref()),
                EntryField::Published => push_optional(&mut element, self.published.as_ref()),
                EntryField::Updated => push_optional(&mut element, self.updated.as_ref()),
                EntryField::Content => push_optional(&mut element, self.content.as_ref()),
                EntryField::Category => push_all(&mut element, &self.categories),
                EntryField::Link => push_all(&mut element, &self.links),
                EntryField::Title | EntryField::Summary | EntryField::Rights => {
                    let value = match field {
                        EntryField::Title => &self.title,
                        EntryField::Summary => &self.summary,
                        _ => &self.rights,
                    };
                    if let Some(value) = value {
                        element.children.push(value.to_named_element(field.name()));
                    }
                }
                EntryField::Author | EntryField::Contributor => {
                    let people = if *field == EntryField::Author {
                        &self.authors
                    } else {
                        &self.contributors
                    };
                    element.children.extend(
                        people
                            .iter()
                            .map(|person| person.to_named_element(field.name())),
                    );
                }
            }
        }
        element.children.extend(extra);
        self.extensions.apply_to(&mut element);
        element
    }
}

impl XmlElement for Entry {
    const NAME: QualifiedName = QualifiedName::new(ATOM_NAMESPACE, "entry");

    fn from_node(node: Node<'_, '_>) -> Self {
        Self::parse_with(node, |_| false)
    }

    fn to_element(&self) -> ExtensionElement {
        self.to_element_with(Vec::new())
    }
}

impl LinkFinder for Entry {
    fn links(&self) -> &[Link] {
        &self.links
    }
}
