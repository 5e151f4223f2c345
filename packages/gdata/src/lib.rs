//! GData Binding - Typed Atom/GData feeds and entries with lossless round trips.
//!
//! This crate parses GData Atom documents into typed values, keeps every
//! element and attribute it does not model in an extension store, and
//! serializes both back out. It also implements the GData batch protocol
//! and the `gd:` extension kinds used alongside it.
//!
//! # Example
//!
//! ```
//! use gdata_binding::batch::{BatchEntry, BatchFeed};
//! use gdata_binding::model::XmlElement;
//!
//! let mut feed = BatchFeed::new();
//! feed.add_insert(BatchEntry::with_id("http://example.com/1"), None).unwrap();
//! feed.add_delete(None, Some("http://example.com/2"), None).unwrap();
//!
//! let xml = feed.to_xml_string().unwrap();
//! let parsed = BatchFeed::from_xml_str(&xml).unwrap();
//! assert_eq!(parsed.entries[1].batch_id_text(), Some("1"));
//! assert_eq!(parsed.entries[1].operation_type(), Some("delete"));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Namespaces, link relations and writer options
//! - [`error`]: Error types and Result alias
//! - [`xml`]: DOM helpers and the namespace-aware writer
//! - [`extension`]: Storage for unmodelled XML
//! - [`schema`]: Static binding tables shared by parser and serializer
//! - [`model`]: Entry, Feed and their child elements
//! - [`links`]: Relation lookup on anything that has links
//! - [`batch`]: Batch entries, feeds and operation helpers
//! - [`gd`]: ExtendedProperty and FeedLink
//! - [`summary`]: Serializable document digests
//! - [`cli`]: Command-line interface

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod extension;
pub mod gd;
pub mod links;
pub mod model;
pub mod schema;
pub mod summary;
pub mod xml;

// Re-export commonly used items
pub use batch::{BatchEntry, BatchFeed, BatchOperationType};
pub use config::WriteOptions;
pub use error::{GDataError, Result};
pub use extension::{ExtensionElement, Extensions};
pub use links::LinkFinder;
pub use model::{Entry, Feed, Link, XmlElement};
