//! Batch protocol elements: correlation id, operation, status and
//! interruption report.

use std::fmt;
use std::str::FromStr;

use roxmltree::Node;

use crate::config::BATCH_NAMESPACE;
use crate::extension::{ExtensionElement, Extensions};
use crate::model::{text_element, XmlElement};
use crate::schema::QualifiedName;
use crate::xml::{collect_text, element_children, get_attribute};

text_element!(
    /// `batch:id`, the client-assigned key that correlates a request entry
    /// with its result entry.
    BatchId, BATCH_NAMESPACE, "id", trim = false
);

/// The operations a batch request can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchOperationType {
    Insert,
    Update,
    Delete,
    Query,
}

impl BatchOperationType {
    /// Get the wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Query => "query",
        }
    }
}

impl fmt::Display for BatchOperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BatchOperationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insert" => Ok(Self::Insert),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "query" => Ok(Self::Query),
            other => Err(format!("unknown batch operation type '{other}'")),
        }
    }
}

/// `batch:operation`.
///
/// The type is stored as the raw string so values outside
/// [`BatchOperationType`] echoed by a server survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOperation {
    pub op_type: Option<String>,
    pub extensions: Extensions,
}

impl BatchOperation {
    /// Create an operation of a known type.
    #[must_use]
    pub fn new(op_type: BatchOperationType) -> Self {
        Self {
            op_type: Some(op_type.as_str().to_string()),
            extensions: Extensions::default(),
        }
    }

    /// The operation as a known type, if it is one.
    #[must_use]
    pub fn kind(&self) -> Option<BatchOperationType> {
        self.op_type.as_deref().and_then(|t| t.parse().ok())
    }
}

impl XmlElement for BatchOperation {
    const NAME: QualifiedName = QualifiedName::new(BATCH_NAMESPACE, "operation");

    fn from_node(node: Node<'_, '_>) -> Self {
        let mut extensions = Extensions::default();
        extensions.capture_attributes(node, &["type"]);
        extensions.capture_text(node);
        for child in element_children(node) {
            extensions.capture_element(child);
        }
        let operation = Self {
            op_type: get_attribute(node, "type"),
            extensions,
        };
        if let (Some(op_type), None) = (&operation.op_type, operation.kind()) {
            tracing::warn!(op_type = %op_type, "unknown batch operation type");
        }
        operation
    }

    fn to_element(&self) -> ExtensionElement {
        let mut element = Self::NAME.element();
        element.set_optional_attribute("type", self.op_type.as_ref());
        self.extensions.apply_to(&mut element);
        element
    }
}

/// `batch:status`, the server's per-entry result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStatus {
    pub code: Option<String>,
    pub reason: Option<String>,
    pub content_type: Option<String>,
    pub text: Option<String>,
    pub extensions: Extensions,
}

impl BatchStatus {
    /// Create a status with a code and reason.
    #[must_use]
    pub fn new(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            reason: Some(reason.into()),
            ..Self::default()
        }
    }

    /// The code as a number, if it is one.
    #[must_use]
    pub fn code_value(&self) -> Option<u16> {
        self.code.as_deref().and_then(|c| c.trim().parse().ok())
    }

    /// Whether the code is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code_value().is_some_and(|code| (200..300).contains(&code))
    }
}

impl XmlElement for BatchStatus {
    const NAME: QualifiedName = QualifiedName::new(BATCH_NAMESPACE, "status");

    fn from_node(node: Node<'_, '_>) -> Self {
        let mut extensions = Extensions::default();
        extensions.capture_attributes(node, &["code", "reason", "content-type"]);
        for child in element_children(node) {
            extensions.capture_element(child);
        }
        Self {
            code: get_attribute(node, "code"),
            reason: get_attribute(node, "reason"),
            content_type: get_attribute(node, "content-type"),
            text: collect_text(node),
            extensions,
        }
    }

    fn to_element(&self) -> ExtensionElement {
        let mut element = Self::NAME.element();
        element.set_optional_attribute("code", self.code.as_ref());
        element.set_optional_attribute("reason", self.reason.as_ref());
        element.set_optional_attribute("content-type", self.content_type.as_ref());
        element.text.clone_from(&self.text);
        self.extensions.apply_to(&mut element);
        element
    }
}

/// `batch:interrupted`, sent when the server stopped processing a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchInterrupted {
    pub reason: Option<String>,
    pub success: Option<String>,
    pub failures: Option<String>,
    pub parsed: Option<String>,
    pub text: Option<String>,
    pub extensions: Extensions,
}

impl XmlElement for BatchInterrupted {
    const NAME: QualifiedName = QualifiedName::new(BATCH_NAMESPACE, "interrupted");

    fn from_node(node: Node<'_, '_>) -> Self {
        let mut extensions = Extensions::default();
        extensions.capture_attributes(node, &["reason", "success", "failures", "parsed"]);
        for child in element_children(node) {
            extensions.capture_element(child);
        }
        Self {
            reason: get_attribute(node, "reason"),
            success: get_attribute(node, "success"),
            failures: get_attribute(node, "failures"),
            parsed: get_attribute(node, "parsed"),
            text: collect_text(node),
            extensions,
        }
    }

    fn to_element(&self) -> ExtensionElement {
        let mut element = Self::NAME.element();
        element.set_optional_attribute("reason", self.reason.as_ref());
        element.set_optional_attribute("success", self.success.as_ref());
        element.set_optional_attribute("failures", self.failures.as_ref());
        element.set_optional_attribute("parsed", self.parsed.as_ref());
        element.text.clone_from(&self.text);
        self.extensions.apply_to(&mut element);
        element
    }
}
