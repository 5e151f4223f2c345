//! Serializable digests of parsed documents, emitted as YAML by the CLI.

use serde::Serialize;

use crate::batch::{BatchEntry, BatchFeed, BatchInterrupted};
use crate::error::Result;
use crate::links::LinkFinder;
use crate::model::{Entry, Feed};

/// Summary of a feed or a single entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<String>,
    pub link_count: usize,
    pub extension_count: usize,
    pub entry_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<EntrySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interrupted: Option<InterruptionSummary>,
}

/// Summary of one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntrySummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Summary of a `batch:interrupted` report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterruptionSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failures: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<String>,
}

impl From<&Entry> for EntrySummary {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id_text().map(str::to_string),
            title: entry.title_text().map(str::to_string),
            alternate: entry.alternate_link().and_then(|l| l.href.clone()),
            ..Self::default()
        }
    }
}

impl From<&BatchEntry> for EntrySummary {
    fn from(entry: &BatchEntry) -> Self {
        let status = entry.batch_status.as_ref();
        Self {
            batch_id: entry.batch_id_text().map(str::to_string),
            operation: entry.operation_type().map(str::to_string),
            status: status.and_then(|s| s.code.clone()),
            reason: status.and_then(|s| s.reason.clone()),
            ..Self::from(&entry.entry)
        }
    }
}

impl From<&BatchInterrupted> for InterruptionSummary {
    fn from(interrupted: &BatchInterrupted) -> Self {
        Self {
            reason: interrupted.reason.clone(),
            success: interrupted.success.clone(),
            failures: interrupted.failures.clone(),
            parsed: interrupted.parsed.clone(),
        }
    }
}

impl DocumentSummary {
    /// Summarize a single entry.
    #[must_use]
    pub fn of_entry(entry: &Entry) -> Self {
        Self {
            kind: "entry",
            id: entry.id_text().map(str::to_string),
            title: entry.title_text().map(str::to_string),
            total_results: None,
            link_count: entry.links.len(),
            extension_count: entry.extensions.elements.len(),
            entry_count: 0,
            entries: Vec::new(),
            interrupted: None,
        }
    }

    /// Summarize a feed and its entries.
    #[must_use]
    pub fn of_feed(feed: &Feed) -> Self {
        Self::from_parts("feed", feed, feed.entries.iter().map(EntrySummary::from).collect())
    }

    /// Summarize a batch feed, including per-entry results.
    #[must_use]
    pub fn of_batch_feed(feed: &BatchFeed) -> Self {
        Self {
            interrupted: feed.interrupted.as_ref().map(InterruptionSummary::from),
            ..Self::from_parts(
                "batch-feed",
                &feed.feed,
                feed.entries.iter().map(EntrySummary::from).collect(),
            )
        }
    }

    fn from_parts<E>(kind: &'static str, feed: &Feed<E>, entries: Vec<EntrySummary>) -> Self {
        Self {
            kind,
            id: feed.id.as_ref().and_then(|id| id.text()).map(str::to_string),
            title: feed.title.as_ref().and_then(|t| t.text.clone()),
            total_results: feed
                .total_results
                .as_ref()
                .and_then(|t| t.text())
                .map(str::to_string),
            link_count: feed.links.len(),
            extension_count: feed.extensions.elements.len(),
            entry_count: entries.len(),
            entries,
            interrupted: None,
        }
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{BatchOperationType, BatchStatus};
    use crate::model::{Link, XmlElement};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entry_summary() {
        let mut entry = Entry::with_id("http://example.com/1");
        entry
            .links
            .push(Link::new("alternate", "http://example.com/page").with_type("text/html"));

        let summary = DocumentSummary::of_entry(&entry);
        assert_eq!(summary.kind, "entry");
        assert_eq!(summary.id.as_deref(), Some("http://example.com/1"));
        assert_eq!(summary.link_count, 1);
        assert_eq!(summary.entry_count, 0);
    }

    #[test]
    fn test_batch_feed_summary_yaml() {
        let mut feed = BatchFeed::new();
        let entry = feed
            .add_insert(BatchEntry::with_id("http://example.com/1"), Some("itemA"))
            .unwrap();
        entry.batch_status = Some(BatchStatus::new("201", "Created"));
        feed.add_delete(None, Some("http://example.com/2"), None).unwrap();

        let summary = DocumentSummary::of_batch_feed(&feed);
        assert_eq!(summary.kind, "batch-feed");
        assert_eq!(summary.entry_count, 2);
        assert_eq!(
            summary.entries[0],
            EntrySummary {
                id: Some("http://example.com/1".to_string()),
                batch_id: Some("itemA".to_string()),
                operation: Some(BatchOperationType::Insert.to_string()),
                status: Some("201".to_string()),
                reason: Some("Created".to_string()),
                ..EntrySummary::default()
            }
        );
        assert_eq!(summary.entries[1].batch_id.as_deref(), Some("1"));

        let yaml = summary.to_yaml().unwrap();
        assert!(yaml.contains("kind: batch-feed"));
        assert!(yaml.contains("status: '201'"));
        assert!(!yaml.contains("interrupted"));
    }

    #[test]
    fn test_feed_summary_counts_extensions() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom" xmlns:openSearch="http://a9.com/-/spec/opensearchrss/1.0/">
  <title>Results</title>
  <openSearch:totalResults>12</openSearch:totalResults>
  <unknown xmlns="urn:x"/>
  <entry><title>One</title></entry>
</feed>"#;
        let feed: Feed = Feed::from_xml_str(xml).unwrap();
        let summary = DocumentSummary::of_feed(&feed);

        assert_eq!(summary.title.as_deref(), Some("Results"));
        assert_eq!(summary.total_results.as_deref(), Some("12"));
        assert_eq!(summary.extension_count, 1);
        assert_eq!(summary.entries[0].title.as_deref(), Some("One"));
        assert!(summary.id.is_none());
    }
}
