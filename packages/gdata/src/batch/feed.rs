//! Batch feeds and the helpers that queue operations into them.

use std::ops::{Deref, DerefMut};

use roxmltree::Node;

use crate::batch::{BatchEntry, BatchId, BatchInterrupted, BatchOperation, BatchOperationType};
use crate::error::{GDataError, Result};
use crate::extension::ExtensionElement;
use crate::links::LinkFinder;
use crate::model::{claim, Feed, Id, Link, XmlElement};
use crate::schema::QualifiedName;

/// A feed of [`BatchEntry`] values, used both for requests and results.
///
/// Entries appended without a batch id get one derived from their
/// position: the number of entries already in the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchFeed {
    pub feed: Feed<BatchEntry>,
    pub interrupted: Option<BatchInterrupted>,
}

impl BatchFeed {
    /// Create an empty batch feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an entry for a batch request.
    ///
    /// * `entry` - entry to queue; when absent a new one is built from `id_url`
    /// * `id_url` - id of the target resource; only used when the entry has
    ///   no id of its own
    /// * `batch_id` - correlation key; when absent an existing key on the
    ///   entry is kept (even an empty one), otherwise the current entry
    ///   count is used
    /// * `operation` - operation to set, replacing any existing one
    ///
    /// # Errors
    /// [`GDataError::MissingRequiredParameters`] when neither `entry` nor
    /// `id_url` is given.
    ///
    /// # Examples
    /// ```
    /// use gdata_binding::batch::BatchFeed;
    ///
    /// let mut feed = BatchFeed::new();
    /// let entry = feed
    ///     .add_batch_entry(None, Some("http://example.com/1"), None, None)
    ///     .unwrap();
    /// assert_eq!(entry.id_text(), Some("http://example.com/1"));
    /// assert_eq!(entry.batch_id_text(), Some("0"));
    ///
    /// assert!(feed.add_batch_entry(None, None, Some("a"), None).is_err());
    /// ```
    pub fn add_batch_entry(
        &mut self,
        entry: Option<BatchEntry>,
        id_url: Option<&str>,
        batch_id: Option<&str>,
        operation: Option<BatchOperationType>,
    ) -> Result<&mut BatchEntry> {
        let mut entry = match (entry, id_url) {
            (Some(entry), _) => entry,
            (None, Some(url)) => BatchEntry::with_id(url),
            (None, None) => {
                return Err(GDataError::MissingRequiredParameters(
                    "an entry or an id URL is required to add a batch entry".to_string(),
                ))
            }
        };

        if entry.id_text().is_none() {
            if let Some(url) = id_url {
                entry.id = Some(Id::new(url));
            }
        }

        let position = self.feed.entries.len();
        match batch_id {
            Some(batch_id) => entry.batch_id = Some(BatchId::new(batch_id)),
            None if entry.batch_id.as_ref().and_then(|id| id.text()).is_none() => {
                entry.batch_id = Some(BatchId::new(position.to_string()));
            }
            None => {}
        }

        if let Some(operation) = operation {
            entry.batch_operation = Some(BatchOperation::new(operation));
        }

        tracing::debug!(
            batch_id = entry.batch_id_text().unwrap_or_default(),
            operation = entry.operation_type().unwrap_or_default(),
            position,
            "queued batch entry"
        );

        self.feed.entries.push(entry);
        Ok(&mut self.feed.entries[position])
    }

    /// Queue an entry for insertion, replacing any operation it carried.
    pub fn add_insert(&mut self, entry: BatchEntry, batch_id: Option<&str>) -> Result<&mut BatchEntry> {
        self.add_batch_entry(Some(entry), None, batch_id, Some(BatchOperationType::Insert))
    }

    /// Queue an entry for update.
    pub fn add_update(&mut self, entry: BatchEntry, batch_id: Option<&str>) -> Result<&mut BatchEntry> {
        self.add_batch_entry(Some(entry), None, batch_id, Some(BatchOperationType::Update))
    }

    /// Queue a deletion, either of an entry or of a bare resource URL.
    pub fn add_delete(
        &mut self,
        entry: Option<BatchEntry>,
        url: Option<&str>,
        batch_id: Option<&str>,
    ) -> Result<&mut BatchEntry> {
        self.add_batch_entry(entry, url, batch_id, Some(BatchOperationType::Delete))
    }

    /// Queue a query, either of an entry or of a bare resource URL.
    pub fn add_query(
        &mut self,
        entry: Option<BatchEntry>,
        url: Option<&str>,
        batch_id: Option<&str>,
    ) -> Result<&mut BatchEntry> {
        self.add_batch_entry(entry, url, batch_id, Some(BatchOperationType::Query))
    }

    /// Find the result entry for a correlation key.
    #[must_use]
    pub fn entry_by_batch_id(&self, batch_id: &str) -> Option<&BatchEntry> {
        self.feed
            .entries
            .iter()
            .find(|entry| entry.batch_id_text() == Some(batch_id))
    }

    /// Result entries whose status is not a 2xx code.
    pub fn failed_entries(&self) -> impl Iterator<Item = &BatchEntry> {
        self.feed
            .entries
            .iter()
            .filter(|entry| entry.batch_status.as_ref().is_some_and(|s| !s.is_success()))
    }
}

impl Deref for BatchFeed {
    type Target = Feed<BatchEntry>;

    fn deref(&self) -> &Feed<BatchEntry> {
        &self.feed
    }
}

impl DerefMut for BatchFeed {
    fn deref_mut(&mut self) -> &mut Feed<BatchEntry> {
        &mut self.feed
    }
}

impl XmlElement for BatchFeed {
    const NAME: QualifiedName = Feed::<BatchEntry>::NAME;

    fn from_node(node: Node<'_, '_>) -> Self {
        let mut interrupted = None;
        let feed = Feed::parse_with(node, |child| {
            BatchInterrupted::NAME.matches(child)
                && claim(&mut interrupted, child, BatchInterrupted::from_node)
        });
        Self { feed, interrupted }
    }

    fn to_element(&self) -> ExtensionElement {
        let extra: Vec<ExtensionElement> = self
            .interrupted
            .as_ref()
            .map(XmlElement::to_element)
            .into_iter()
            .collect();
        self.feed.to_element_with(extra)
    }
}

impl LinkFinder for BatchFeed {
    fn links(&self) -> &[Link] {
        &self.feed.links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entry;
    use pretty_assertions::assert_eq;

    fn example_entry(id: &str) -> BatchEntry {
        BatchEntry::new(Entry::with_id(id).with_text("This is a test"))
    }

    #[test]
    fn test_add_batch_entry_requires_target() {
        let mut feed = BatchFeed::new();
        let err = feed.add_batch_entry(None, None, Some("a"), None).unwrap_err();
        assert!(matches!(err, GDataError::MissingRequiredParameters(_)));
        assert!(feed.entries.is_empty());
    }

    #[test]
    fn test_add_batch_entry_from_url() {
        let mut feed = BatchFeed::new();
        let entry = feed
            .add_batch_entry(None, Some("http://example.com/1"), None, None)
            .unwrap();
        assert_eq!(entry.id_text(), Some("http://example.com/1"));
        assert_eq!(entry.batch_id_text(), Some("0"));
        assert!(entry.batch_operation.is_none());
        assert_eq!(feed.entries.len(), 1);
        assert_eq!(feed.entries[0].batch_id_text(), Some("0"));
    }

    #[test]
    fn test_add_batch_entry_explicit_batch_id() {
        let mut feed = BatchFeed::new();
        let entry = feed
            .add_batch_entry(Some(BatchEntry::with_id("originalId")), None, Some("foo"), None)
            .unwrap();
        assert_eq!(entry.batch_id_text(), Some("foo"));
        assert_eq!(entry.id_text(), Some("originalId"));
    }

    #[test]
    fn test_entry_id_wins_over_id_url() {
        let mut feed = BatchFeed::new();
        let to_add = BatchEntry::with_id("originalId").with_batch_id("bar");
        let entry = feed
            .add_batch_entry(Some(to_add), Some("newId"), Some("foo"), None)
            .unwrap();
        assert_eq!(entry.batch_id_text(), Some("foo"));
        assert_eq!(entry.id_text(), Some("originalId"));
    }

    #[test]
    fn test_existing_batch_id_is_kept() {
        let mut feed = BatchFeed::new();
        let to_add = BatchEntry::with_id("originalId").with_batch_id("bar");
        let entry = feed
            .add_batch_entry(Some(to_add), Some("newId"), None, None)
            .unwrap();
        assert_eq!(entry.batch_id_text(), Some("bar"));
        assert_eq!(entry.id_text(), Some("originalId"));
    }

    #[test]
    fn test_empty_batch_id_is_kept() {
        let mut feed = BatchFeed::new();
        let entry = feed
            .add_batch_entry(Some(BatchEntry::with_id("a").with_batch_id("")), None, None, None)
            .unwrap();
        assert_eq!(entry.batch_id.as_ref().and_then(BatchId::text), Some(""));
        assert_eq!(entry.batch_id_text(), None);
    }

    #[test]
    fn test_batch_id_without_text_is_assigned() {
        let mut feed = BatchFeed::new();
        feed.add_batch_entry(None, Some("a"), None, None).unwrap();
        let entry = BatchEntry {
            batch_id: Some(BatchId::default()),
            ..BatchEntry::with_id("b")
        };
        let entry = feed.add_batch_entry(Some(entry), None, None, None).unwrap();
        assert_eq!(entry.batch_id_text(), Some("1"));
    }

    #[test]
    fn test_id_url_seeds_entry_without_id() {
        let mut feed = BatchFeed::new();
        let entry = feed
            .add_batch_entry(Some(BatchEntry::default()), Some("newId"), None, None)
            .unwrap();
        assert_eq!(entry.id_text(), Some("newId"));
    }

    #[test]
    fn test_operation_overrides_existing() {
        let mut feed = BatchFeed::new();
        let to_add = BatchEntry::with_id("originalId")
            .with_batch_id("bar")
            .with_operation(BatchOperationType::Insert);
        assert_eq!(to_add.operation_type(), Some("insert"));

        let entry = feed
            .add_batch_entry(
                Some(to_add),
                Some("newId"),
                Some("foo"),
                Some(BatchOperationType::Update),
            )
            .unwrap();
        assert_eq!(entry.operation_type(), Some("update"));
    }

    #[test]
    fn test_add_insert() {
        let mut feed = BatchFeed::new();
        feed.add_insert(example_entry("http://example.com/1"), None).unwrap();
        feed.add_insert(example_entry("http://example.com/2"), Some("foo")).unwrap();
        let third = example_entry("http://example.com/3").with_operation(BatchOperationType::Delete);
        feed.add_insert(third, None).unwrap();

        assert_eq!(feed.entries[0].operation_type(), Some("insert"));
        assert_eq!(feed.entries[0].batch_id_text(), Some("0"));
        assert_eq!(feed.entries[1].operation_type(), Some("insert"));
        assert_eq!(feed.entries[1].batch_id_text(), Some("foo"));
        assert_eq!(feed.entries[2].operation_type(), Some("insert"));
        assert_eq!(feed.entries[2].batch_id_text(), Some("2"));
    }

    #[test]
    fn test_add_delete() {
        let mut feed = BatchFeed::new();
        feed.add_delete(Some(example_entry("http://example.com/1")), None, None)
            .unwrap();
        feed.add_delete(None, Some("http://example.com/2"), None).unwrap();

        assert_eq!(feed.entries[0].operation_type(), Some("delete"));
        assert_eq!(feed.entries[0].id_text(), Some("http://example.com/1"));
        assert_eq!(feed.entries[0].text(), Some("This is a test"));
        assert_eq!(feed.entries[1].operation_type(), Some("delete"));
        assert_eq!(feed.entries[1].id_text(), Some("http://example.com/2"));
        assert_eq!(feed.entries[1].text(), None);
    }

    #[test]
    fn test_add_query() {
        let mut feed = BatchFeed::new();
        feed.add_query(Some(BatchEntry::with_id("http://example.com/1")), None, None)
            .unwrap();
        feed.add_query(None, Some("http://example.com/2"), None).unwrap();

        assert_eq!(feed.entries[0].operation_type(), Some("query"));
        assert_eq!(feed.entries[1].operation_type(), Some("query"));
        assert_eq!(feed.entries[1].id_text(), Some("http://example.com/2"));
    }

    #[test]
    fn test_add_update() {
        let mut feed = BatchFeed::new();
        feed.add_update(example_entry("http://example.com/1"), None).unwrap();

        assert_eq!(feed.entries[0].operation_type(), Some("update"));
        assert_eq!(feed.entries[0].id_text(), Some("http://example.com/1"));
        assert_eq!(feed.entries[0].text(), Some("This is a test"));
    }

    #[test]
    fn test_delete_and_query_without_target_fail() {
        let mut feed = BatchFeed::new();
        assert!(feed.add_delete(None, None, None).is_err());
        assert!(feed.add_query(None, None, Some("x")).is_err());
    }

    #[test]
    fn test_auto_batch_id_follows_current_length() {
        let mut feed = BatchFeed::new();
        feed.add_insert(example_entry("a"), None).unwrap();
        feed.add_insert(example_entry("b"), None).unwrap();
        feed.entries.remove(0);
        let entry = feed.add_insert(example_entry("c"), None).unwrap();
        assert_eq!(entry.batch_id_text(), Some("1"));
    }

    #[test]
    fn test_interrupted_and_failed_entries() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom" xmlns:batch="http://schemas.google.com/gdata/batch">
  <batch:interrupted reason="timeout" success="1" failures="1" parsed="2"/>
  <entry><batch:id>a</batch:id><batch:status code="201" reason="Created"/></entry>
  <entry><batch:id>b</batch:id><batch:status code="404" reason="Not Found"/></entry>
</feed>"#;
        let feed = BatchFeed::from_xml_str(xml).unwrap();

        assert_eq!(
            feed.interrupted.as_ref().and_then(|i| i.reason.as_deref()),
            Some("timeout")
        );
        let failed: Vec<_> = feed.failed_entries().filter_map(BatchEntry::batch_id_text).collect();
        assert_eq!(failed, vec!["b"]);
        assert_eq!(
            feed.entry_by_batch_id("a")
                .and_then(|e| e.batch_status.as_ref())
                .and_then(|s| s.code.as_deref()),
            Some("201")
        );
        assert!(feed.entry_by_batch_id("missing").is_none());

        let reparsed = BatchFeed::from_xml_str(&feed.to_xml_string().unwrap()).unwrap();
        assert_eq!(reparsed, feed);
    }

    #[test]
    fn test_request_feed_serializes_operations() {
        let mut feed = BatchFeed::new();
        feed.add_insert(example_entry("http://example.com/1"), None).unwrap();
        feed.add_delete(None, Some("http://example.com/2"), None).unwrap();
        let xml = feed.to_xml_string().unwrap();

        assert!(xml.contains(r#"<batch:operation type="insert"/>"#));
        assert!(xml.contains(r#"<batch:operation type="delete"/>"#));
        assert!(xml.contains("<batch:id>1</batch:id>"));

        let reparsed = BatchFeed::from_xml_str(&xml).unwrap();
        assert_eq!(reparsed.entries.len(), 2);
        assert_eq!(reparsed, feed);
    }
}
