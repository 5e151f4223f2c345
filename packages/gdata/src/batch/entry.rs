//! Entries of batch request and result feeds.

use std::ops::{Deref, DerefMut};

use roxmltree::Node;

use crate::batch::{BatchId, BatchOperation, BatchOperationType, BatchStatus};
use crate::extension::ExtensionElement;
use crate::links::LinkFinder;
use crate::model::{claim, Entry, Link, XmlElement};
use crate::schema::{Binding, QualifiedName};

/// Batch children of an entry, in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchEntryField {
    Id,
    Operation,
    Status,
}

impl Binding for BatchEntryField {
    const ALL: &'static [Self] = &[Self::Id, Self::Operation, Self::Status];

    fn name(self) -> QualifiedName {
        match self {
            Self::Id => BatchId::NAME,
            Self::Operation => BatchOperation::NAME,
            Self::Status => BatchStatus::NAME,
        }
    }
}

/// An [`Entry`] plus the batch protocol fields.
///
/// `batch_id` and `batch_status` are filled in by the server in result
/// feeds; request entries usually carry only an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchEntry {
    pub entry: Entry,
    pub batch_id: Option<BatchId>,
    pub batch_operation: Option<BatchOperation>,
    pub batch_status: Option<BatchStatus>,
}

impl BatchEntry {
    /// Wrap an entry without batch fields.
    #[must_use]
    pub fn new(entry: Entry) -> Self {
        Self {
            entry,
            ..Self::default()
        }
    }

    /// Create a batch entry that only identifies a resource.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self::new(Entry::with_id(id))
    }

    /// Set the batch id.
    #[must_use]
    pub fn with_batch_id(mut self, batch_id: impl Into<String>) -> Self {
        self.batch_id = Some(BatchId::new(batch_id));
        self
    }

    /// Set the operation.
    #[must_use]
    pub fn with_operation(mut self, op_type: BatchOperationType) -> Self {
        self.batch_operation = Some(BatchOperation::new(op_type));
        self
    }

    /// The batch id text, if set and non-empty.
    #[must_use]
    pub fn batch_id_text(&self) -> Option<&str> {
        self.batch_id
            .as_ref()
            .and_then(BatchId::text)
            .filter(|text| !text.is_empty())
    }

    /// The raw operation type, as sent or echoed.
    #[must_use]
    pub fn operation_type(&self) -> Option<&str> {
        self.batch_operation
            .as_ref()
            .and_then(|op| op.op_type.as_deref())
    }

    /// Unwrap into the plain entry, dropping the batch fields.
    #[must_use]
    pub fn into_entry(self) -> Entry {
        self.entry
    }
}

impl From<Entry> for BatchEntry {
    fn from(entry: Entry) -> Self {
        Self::new(entry)
    }
}

impl Deref for BatchEntry {
    type Target = Entry;

    fn deref(&self) -> &Entry {
        &self.entry
    }
}

impl DerefMut for BatchEntry {
    fn deref_mut(&mut self) -> &mut Entry {
        &mut self.entry
    }
}

impl XmlElement for BatchEntry {
    const NAME: QualifiedName = Entry::NAME;

    fn from_node(node: Node<'_, '_>) -> Self {
        let mut batch_id = None;
        let mut batch_operation = None;
        let mut batch_status = None;

        let entry = Entry::parse_with(node, |child| match BatchEntryField::resolve(child) {
            Some(BatchEntryField::Id) => claim(&mut batch_id, child, BatchId::from_node),
            Some(BatchEntryField::Operation) => {
                claim(&mut batch_operation, child, BatchOperation::from_node)
            }
            Some(BatchEntryField::Status) => claim(&mut batch_status, child, BatchStatus::from_node),
            None => false,
        });

        Self {
            entry,
            batch_id,
            batch_operation,
            batch_status,
        }
    }

    fn to_element(&self) -> ExtensionElement {
        let mut batch_children = Vec::new();
        for field in BatchEntryField::ALL {
            let child = match field {
                BatchEntryField::Id => self.batch_id.as_ref().map(XmlElement::to_element),
                BatchEntryField::Operation => {
                    self.batch_operation.as_ref().map(XmlElement::to_element)
                }
                BatchEntryField::Status => self.batch_status.as_ref().map(XmlElement::to_element),
            };
            batch_children.extend(child);
        }
        self.entry.to_element_with(batch_children)
    }
}

impl LinkFinder for BatchEntry {
    fn links(&self) -> &[Link] {
        &self.entry.links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BATCH_NAMESPACE;
    use pretty_assertions::assert_eq;

    const BATCH_ENTRY: &str = r#"<entry xmlns="http://www.w3.org/2005/Atom" xmlns:batch="http://schemas.google.com/gdata/batch">
  <id>http://www.google.com/base/feeds/items/2173859253842813008</id>
  <batch:operation type="insert"/>
  <batch:id>itemB</batch:id>
  <batch:status code="201" reason="Created"/>
</entry>"#;

    #[test]
    fn test_parse_batch_fields() {
        let entry = BatchEntry::from_xml_str(BATCH_ENTRY).unwrap();

        assert_eq!(entry.batch_id_text(), Some("itemB"));
        assert_eq!(entry.operation_type(), Some("insert"));
        assert_eq!(
            entry.batch_operation.as_ref().and_then(BatchOperation::kind),
            Some(BatchOperationType::Insert)
        );
        let status = entry.batch_status.as_ref().unwrap();
        assert_eq!(status.code.as_deref(), Some("201"));
        assert_eq!(status.reason.as_deref(), Some("Created"));
        assert!(entry.extensions.is_empty());
    }

    #[test]
    fn test_deref_reaches_entry_fields() {
        let entry = BatchEntry::from_xml_str(BATCH_ENTRY).unwrap();
        assert_eq!(
            entry.id_text(),
            Some("http://www.google.com/base/feeds/items/2173859253842813008")
        );
    }

    #[test]
    fn test_round_trip() {
        let entry = BatchEntry::from_xml_str(BATCH_ENTRY).unwrap();
        let reparsed = BatchEntry::from_xml_str(&entry.to_xml_string().unwrap()).unwrap();
        assert_eq!(reparsed, entry);
    }

    #[test]
    fn test_plain_entry_keeps_batch_elements_as_extensions() {
        let entry = Entry::from_xml_str(BATCH_ENTRY).unwrap();
        assert_eq!(
            entry
                .extensions
                .find_extensions(None, Some(BATCH_NAMESPACE))
                .count(),
            3
        );
    }

    #[test]
    fn test_repeated_batch_id_is_kept_as_extension() {
        let xml = r#"<entry xmlns="http://www.w3.org/2005/Atom" xmlns:batch="http://schemas.google.com/gdata/batch"><batch:id>a</batch:id><batch:id>b</batch:id></entry>"#;
        let entry = BatchEntry::from_xml_str(xml).unwrap();

        assert_eq!(entry.batch_id_text(), Some("a"));
        assert_eq!(entry.extensions.elements.len(), 1);
        assert_eq!(entry.extensions.elements[0].text.as_deref(), Some("b"));
    }

    #[test]
    fn test_empty_batch_id_text_is_absent() {
        let entry = BatchEntry::with_id("x").with_batch_id("");
        assert_eq!(entry.batch_id_text(), None);
    }
}
