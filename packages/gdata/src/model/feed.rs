//! Atom/GData `feed`.

use roxmltree::Node;

use crate::config::ATOM_NAMESPACE;
use crate::extension::{ExtensionElement, Extensions};
use crate::links::LinkFinder;
use crate::model::{
    bind_single, push_all, push_optional, Category, Entry, Generator, Icon, Id, ItemsPerPage,
    Link, Logo, Person, StartIndex, TextConstruct, TotalResults, Updated, XmlElement,
};
use crate::schema::{Binding, QualifiedName};
use crate::xml::element_children;

/// Known children of a feed, in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedField {
    Id,
    Updated,
    Category,
    Title,
    Subtitle,
    Link,
    Author,
    Contributor,
    Generator,
    Icon,
    Logo,
    Rights,
    TotalResults,
    StartIndex,
    ItemsPerPage,
    Entry,
}

impl Binding for FeedField {
    const ALL: &'static [Self] = &[
        Self::Id,
        Self::Updated,
        Self::Category,
        Self::Title,
        Self::Subtitle,
        Self::Link,
        Self::Author,
        Self::Contributor,
        Self::Generator,
        Self::Icon,
        Self::Logo,
        Self::Rights,
        Self::TotalResults,
        Self::StartIndex,
        Self::ItemsPerPage,
        Self::Entry,
    ];

    fn name(self) -> QualifiedName {
        match self {
            Self::Id => Id::NAME,
            Self::Updated => Updated::NAME,
            Self::Category => Category::NAME,
            Self::Title => QualifiedName::new(ATOM_NAMESPACE, "title"),
            Self::Subtitle => QualifiedName::new(ATOM_NAMESPACE, "subtitle"),
            Self::Link => Link::NAME,
            Self::Author => QualifiedName::new(ATOM_NAMESPACE, "author"),
            Self::Contributor => QualifiedName::new(ATOM_NAMESPACE, "contributor"),
            Self::Generator => Generator::NAME,
            Self::Icon => Icon::NAME,
            Self::Logo => Logo::NAME,
            Self::Rights => QualifiedName::new(ATOM_NAMESPACE, "rights"),
            Self::TotalResults => TotalResults::NAME,
            Self::StartIndex => StartIndex::NAME,
            Self::ItemsPerPage => ItemsPerPage::NAME,
            Self::Entry => Entry::NAME,
        }
    }
}

/// An ordered collection of entries plus feed metadata.
///
/// The entry type is a parameter so batch feeds can hold
/// [`BatchEntry`](crate::batch::BatchEntry) values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed<E = Entry> {
    pub id: Option<Id>,
    pub title: Option<TextConstruct>,
    pub subtitle: Option<TextConstruct>,
    pub updated: Option<Updated>,
    pub generator: Option<Generator>,
    pub icon: Option<Icon>,
    pub logo: Option<Logo>,
    pub rights: Option<TextConstruct>,
    pub authors: Vec<Person>,
    pub contributors: Vec<Person>,
    pub categories: Vec<Category>,
    pub links: Vec<Link>,
    pub total_results: Option<TotalResults>,
    pub start_index: Option<StartIndex>,
    pub items_per_page: Option<ItemsPerPage>,
    pub entries: Vec<E>,
    pub extensions: Extensions,
}

impl<E> Default for Feed<E> {
    fn default() -> Self {
        Self {
            id: None,
            title: None,
            subtitle: None,
            updated: None,
            generator: None,
            icon: None,
            logo: None,
            rights: None,
            authors: Vec::new(),
            contributors: Vec::new(),
            categories: Vec::new(),
            links: Vec::new(),
            total_results: None,
            start_index: None,
            items_per_page: None,
            entries: Vec::new(),
            extensions: Extensions::default(),
        }
    }
}

impl<E: XmlElement> Feed<E> {
    /// Create an empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The id text, if the feed has a non-empty id.
    #[must_use]
    pub fn id_text(&self) -> Option<&str> {
        self.id.as_ref().and_then(Id::text)
    }

    /// The title text, if any.
    #[must_use]
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().and_then(|t| t.text.as_deref())
    }

    /// Bind a feed, offering unknown children to `extra` first.
    pub fn parse_with<'a, 'input>(
        node: Node<'a, 'input>,
        mut extra: impl FnMut(Node<'a, 'input>) -> bool,
    ) -> Self {
        let mut feed = Self::default();
        feed.extensions.capture_attributes(node, &[]);
        feed.extensions.capture_text(node);

        for child in element_children(node) {
            let ext = &mut feed.extensions;
            match FeedField::resolve(child) {
                Some(FeedField::Id) => bind_single(&mut feed.id, child, ext, Id::from_node),
                Some(FeedField::Updated) => {
                    bind_single(&mut feed.updated, child, ext, Updated::from_node);
                }
                Some(FeedField::Title) => {
                    bind_single(&mut feed.title, child, ext, TextConstruct::from_node);
                }
                Some(FeedField::Subtitle) => {
                    bind_single(&mut feed.subtitle, child, ext, TextConstruct::from_node);
                }
                Some(FeedField::Rights) => {
                    bind_single(&mut feed.rights, child, ext, TextConstruct::from_node);
                }
                Some(FeedField::Generator) => {
                    bind_single(&mut feed.generator, child, ext, Generator::from_node);
                }
                Some(FeedField::Icon) => bind_single(&mut feed.icon, child, ext, Icon::from_node),
                Some(FeedField::Logo) => bind_single(&mut feed.logo, child, ext, Logo::from_node),
                Some(FeedField::TotalResults) => {
                    bind_single(&mut feed.total_results, child, ext, TotalResults::from_node);
                }
                Some(FeedField::StartIndex) => {
                    bind_single(&mut feed.start_index, child, ext, StartIndex::from_node);
                }
                Some(FeedField::ItemsPerPage) => {
                    bind_single(&mut feed.items_per_page, child, ext, ItemsPerPage::from_node);
                }
                Some(FeedField::Category) => feed.categories.push(Category::from_node(child)),
                Some(FeedField::Link) => feed.links.push(Link::from_node(child)),
                Some(FeedField::Author) => feed.authors.push(Person::from_node(child)),
                Some(FeedField::Contributor) => feed.contributors.push(Person::from_node(child)),
                Some(FeedField::Entry) => feed.entries.push(E::from_node(child)),
                None => {
                    if !extra(child) {
                        ext.capture_element(child);
                    }
                }
            }
        }

        tracing::debug!(entries = feed.entries.len(), "parsed feed");
        feed
    }

    /// Build the feed element with `extra` known children inserted before
    /// the entries.
    #[must_use]
    pub fn to_element_with(&self, extra: Vec<ExtensionElement>) -> ExtensionElement {
        let mut element = Self::NAME.element();
        let mut extra = Some(extra);
        for field in FeedField::ALL {
            match field {
                FeedField::Id => push_optional(&mut element, self.id.as_ref()),
                FeedField::Updated => push_optional(&mut element, self.updated.as_ref()),
                FeedField::Generator => push_optional(&mut element, self.generator.as_ref()),
                FeedField::Icon => push_optional(&mut element, self.icon.as_ref()),
                FeedField::Logo => push_optional(&mut element, self.logo.as_ref()),
                FeedField::TotalResults => {
                    push_optional(&mut element, self.total_results.as_ref());
                }
                FeedField::StartIndex => push_optional(&mut element, self.start_index.as_ref()),
                FeedField::ItemsPerPage => {
                    push_optional(&mut element, self.items_per_page.as_ref());
                }
                FeedField::Category => push_all(&mut element, &self.categories),
                FeedField::Link => push_all(&mut element, &self.links),
                FeedField::Title | FeedField::Subtitle | FeedField::Rights => {
                    let value = match field {
                        FeedField::Title => &self.title,
                        FeedField::Subtitle => &self.subtitle,
                        _ => &self.rights,
                    };
                    if let Some(value) = value {
                        element.children.push(value.to_named_element(field.name()));
                    }
                }
                FeedField::Author | FeedField::Contributor => {
                    let people = if *field == FeedField::Author {
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
                FeedField::Entry => {
                    element.children.extend(extra.take().unwrap_or_default());
                    push_all(&mut element, &self.entries);
                }
            }
        }
        self.extensions.apply_to(&mut element);
        element
    }
}

impl<E: XmlElement> XmlElement for Feed<E> {
    const NAME: QualifiedName = QualifiedName::new(ATOM_NAMESPACE, "feed");

    fn from_node(node: Node<'_, '_>) -> Self {
        Self::parse_with(node, |_| false)
    }

    fn to_element(&self) -> ExtensionElement {
        self.to_element_with(Vec::new())
    }
}

impl<E> LinkFinder for Feed<E> {
    fn links(&self) -> &[Link] {
        &self.links
    }
}
