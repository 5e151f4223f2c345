//! Error types for the GData binding.
//!
//! Structural problems (malformed XML, a document rooted at the wrong
//! element, a batch helper with nothing to target) are errors. Lookups that
//! find nothing inside a valid document are modelled as `Option::None`
//! instead.

use thiserror::Error;

/// Main error type for the binding library.
#[derive(Debug, Error)]
pub enum GDataError {
    /// The input text is not well-formed XML.
    #[error("XML parsing failed: {0}")]
    Parse(#[from] roxmltree::Error),

    /// The document parsed, but its root element is not the one requested.
    #[error("Unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot { expected: String, found: String },

    /// A batch helper was called without an entry or an id URL.
    #[error("Missing required parameters: {0}")]
    MissingRequiredParameters(String),

    /// Writing the XML output failed.
    #[error("XML writing failed: {0}")]
    Write(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

impl GDataError {
    /// Whether this error came from reading the input document.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::UnexpectedRoot { .. })
    }
}

/// Result type alias for binding operations.
pub type Result<T> = std::result::Result<T, GDataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GDataError::MissingRequiredParameters(
            "an entry or an id URL is required".to_string(),
        );
        assert!(err.to_string().contains("Missing required parameters"));
        assert!(err.to_string().contains("id URL"));
    }

    #[test]
    fn test_unexpected_root_display() {
        let err = GDataError::UnexpectedRoot {
            expected: "entry".to_string(),
            found: "feed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected root element <feed>, expected <entry>"
        );
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_malformed_xml_is_parse_error() {
        let err: GDataError = roxmltree::Document::parse("<entry>")
            .map(|_| ())
            .unwrap_err()
            .into();
        assert!(err.is_parse_error());
        assert!(err.to_string().starts_with("XML parsing failed"));
    }
}
