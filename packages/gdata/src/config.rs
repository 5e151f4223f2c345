//! Namespace URIs, link relations and serialization options.

/// Atom syndication format namespace.
pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// GData common elements namespace (`gd:`).
pub const GDATA_NAMESPACE: &str = "http://schemas.google.com/g/2005";

/// OpenSearch namespace used for search metadata on feeds.
pub const OPENSEARCH_NAMESPACE: &str = "http://a9.com/-/spec/opensearchrss/1.0/";

/// Batch protocol namespace (`batch:`).
pub const BATCH_NAMESPACE: &str = "http://schemas.google.com/gdata/batch";

/// Atom Publishing Protocol namespace (`app:`).
pub const APP_NAMESPACE: &str = "http://www.w3.org/2007/app";

/// The reserved `xml:` namespace, bound implicitly in every document.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Prefixes used when writing the well-known namespaces.
///
/// Any other namespace gets a generated `nsN` prefix.
pub const KNOWN_PREFIXES: &[(&str, &str)] = &[
    (ATOM_NAMESPACE, "atom"),
    (GDATA_NAMESPACE, "gd"),
    (OPENSEARCH_NAMESPACE, "openSearch"),
    (BATCH_NAMESPACE, "batch"),
    (APP_NAMESPACE, "app"),
];

/// Look up the conventional prefix for a namespace.
#[must_use]
pub fn known_prefix(namespace: &str) -> Option<&'static str> {
    KNOWN_PREFIXES
        .iter()
        .find(|(uri, _)| *uri == namespace)
        .map(|(_, prefix)| *prefix)
}

/// Link relation values recognized by the link finder.
pub mod rel {
    /// Alternate representation, usually HTML.
    pub const ALTERNATE: &str = "alternate";
    /// License that applies to the resource.
    pub const LICENSE: &str = "license";
    /// The resource itself.
    pub const SELF: &str = "self";
    /// Editable URI of the resource.
    pub const EDIT: &str = "edit";
    /// Editable URI of the media resource.
    pub const EDIT_MEDIA: &str = "edit-media";
    /// Next page of results.
    pub const NEXT: &str = "next";
    /// Previous page of results.
    pub const PREVIOUS: &str = "previous";
    /// Location of the full feed.
    pub const FEED: &str = "http://schemas.google.com/g/2005#feed";
    /// Location to POST new entries to.
    pub const POST: &str = "http://schemas.google.com/g/2005#post";
    /// Location to POST batch feeds to.
    pub const BATCH: &str = "http://schemas.google.com/g/2005#batch";
}

/// Media type of the HTML alternate link.
pub const HTML_MEDIA_TYPE: &str = "text/html";

/// Default indentation width for pretty output.
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// Options controlling how documents are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Indent nested elements.
    pub pretty: bool,
    /// Spaces per nesting level when `pretty` is set.
    pub indent_width: usize,
    /// Emit an `<?xml version="1.0" encoding="UTF-8"?>` declaration.
    pub xml_declaration: bool,
}

impl WriteOptions {
    /// Compact output without a declaration.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            pretty: false,
            indent_width: DEFAULT_INDENT_WIDTH,
            xml_declaration: false,
        }
    }

    /// Indented output with a declaration, for files meant to be read.
    #[must_use]
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            indent_width: DEFAULT_INDENT_WIDTH,
            xml_declaration: true,
        }
    }

    /// Set the indentation width.
    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Toggle the XML declaration.
    #[must_use]
    pub fn with_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::compact()
    }
}
