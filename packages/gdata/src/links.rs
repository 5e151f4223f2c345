//! Relation-indexed link lookup.

use crate::config::{rel, HTML_MEDIA_TYPE};
use crate::model::Link;

/// Capability of anything that owns an ordered sequence of links.
///
/// All lookups scan in document order and return the first link whose
/// `rel` equals the requested relation exactly. Later links with the same
/// relation stay in the data but are not returned. A miss is `None`.
pub trait LinkFinder {
    /// The links in document order.
    fn links(&self) -> &[Link];

    /// First link with the given relation.
    ///
    /// # Examples
    /// ```
    /// use gdata_binding::links::LinkFinder;
    /// use gdata_binding::model::{Entry, Link};
    ///
    /// let mut entry = Entry::new();
    /// entry.links.push(Link::new("license", "http://example.com/a"));
    /// entry.links.push(Link::new("license", "http://example.com/b"));
    ///
    /// assert_eq!(entry.find_link("license").unwrap().href.as_deref(), Some("http://example.com/a"));
    /// assert!(entry.find_link("LICENSE").is_none());
    /// ```
    fn find_link(&self, rel: &str) -> Option<&Link> {
        self.links().iter().find(|link| link.has_rel(rel))
    }

    /// All links with the given relation, in document order.
    fn find_links<'a>(&'a self, rel: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links().iter().filter(move |link| link.has_rel(rel))
    }

    /// The `license` link, naming the content's license.
    fn license_link(&self) -> Option<&Link> {
        self.find_link(rel::LICENSE)
    }

    /// The first `alternate` link, an alternate representation.
    fn alternate_link(&self) -> Option<&Link> {
        self.find_link(rel::ALTERNATE)
    }

    /// The `self` link, the canonical URL of this resource.
    fn self_link(&self) -> Option<&Link> {
        self.find_link(rel::SELF)
    }

    /// The `edit` link, where updates and deletes are sent.
    fn edit_link(&self) -> Option<&Link> {
        self.find_link(rel::EDIT)
    }

    /// The `edit-media` link of a media resource.
    fn edit_media_link(&self) -> Option<&Link> {
        self.find_link(rel::EDIT_MEDIA)
    }

    /// The `next` link of a paged feed.
    fn next_link(&self) -> Option<&Link> {
        self.find_link(rel::NEXT)
    }

    /// The `previous` link of a paged feed.
    fn prev_link(&self) -> Option<&Link> {
        self.find_link(rel::PREVIOUS)
    }

    /// The GData `#feed` link, the feed this resource belongs to.
    fn feed_link(&self) -> Option<&Link> {
        self.find_link(rel::FEED)
    }

    /// The GData `#post` link, where new entries are inserted.
    fn post_link(&self) -> Option<&Link> {
        self.find_link(rel::POST)
    }

    /// The GData `#batch` link, where batch feeds are submitted.
    fn batch_link(&self) -> Option<&Link> {
        self.find_link(rel::BATCH)
    }

    /// First alternate link served as HTML.
    fn html_link(&self) -> Option<&Link> {
        self.find_links(rel::ALTERNATE)
            .find(|link| link.link_type.as_deref() == Some(HTML_MEDIA_TYPE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entry;

    fn entry_with(links: Vec<Link>) -> Entry {
        Entry {
            links,
            ..Entry::default()
        }
    }

    #[test]
    fn test_first_match_wins() {
        let entry = entry_with(vec![
            Link::new("self", "http://example.com/self"),
            Link::new("alternate", "http://example.com/first"),
            Link::new("alternate", "http://example.com/second"),
        ]);

        let link = entry.alternate_link().unwrap();
        assert_eq!(link.href.as_deref(), Some("http://example.com/first"));
        assert_eq!(entry.find_links("alternate").count(), 2);
        assert_eq!(entry.links.len(), 3);
    }

    #[test]
    fn test_miss_is_none() {
        let entry = entry_with(vec![Link::new("self", "http://example.com/self")]);
        assert!(entry.license_link().is_none());
        assert!(entry.next_link().is_none());
        assert!(entry_with(Vec::new()).self_link().is_none());
    }

    #[test]
    fn test_case_sensitive() {
        let entry = entry_with(vec![Link::new("Edit", "http://example.com/edit")]);
        assert!(entry.edit_link().is_none());
        assert!(entry.find_link("Edit").is_some());
    }

    #[test]
    fn test_html_link_skips_non_html_alternates() {
        let entry = entry_with(vec![
            Link::new("alternate", "http://example.com/feed").with_type("application/atom+xml"),
            Link::new("alternate", "http://example.com/page").with_type("text/html"),
        ]);
        assert_eq!(
            entry.html_link().and_then(|l| l.href.as_deref()),
            Some("http://example.com/page")
        );
    }

    #[test]
    fn test_atom_relations() {
        let entry = entry_with(vec![
            Link::new(rel::LICENSE, "http://example.com/license"),
            Link::new(rel::SELF, "http://example.com/self"),
            Link::new(rel::EDIT, "http://example.com/edit"),
            Link::new(rel::EDIT_MEDIA, "http://example.com/media"),
            Link::new(rel::NEXT, "http://example.com/next"),
            Link::new(rel::PREVIOUS, "http://example.com/prev"),
        ]);
        let href = |link: Option<&Link>| link.and_then(|l| l.href.clone());
        assert_eq!(href(entry.license_link()).as_deref(), Some("http://example.com/license"));
        assert_eq!(href(entry.self_link()).as_deref(), Some("http://example.com/self"));
        assert_eq!(href(entry.edit_link()).as_deref(), Some("http://example.com/edit"));
        assert_eq!(href(entry.edit_media_link()).as_deref(), Some("http://example.com/media"));
        assert_eq!(href(entry.next_link()).as_deref(), Some("http://example.com/next"));
        assert_eq!(href(entry.prev_link()).as_deref(), Some("http://example.com/prev"));
        assert!(entry.alternate_link().is_none());
    }

    #[test]
    fn test_gdata_relations() {
        let entry = entry_with(vec![
            Link::new(rel::FEED, "http://example.com/feed"),
            Link::new(rel::POST, "http://example.com/post"),
            Link::new(rel::BATCH, "http://example.com/batch"),
        ]);
        assert!(entry.feed_link().is_some());
        assert!(entry.post_link().is_some());
        assert_eq!(
            entry.batch_link().and_then(|l| l.href.as_deref()),
            Some("http://example.com/batch")
        );
    }
}
