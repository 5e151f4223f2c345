//! Elements of the GData (`gd:`) namespace.

mod extended_property;
mod feed_link;

pub use extended_property::ExtendedProperty;
pub use feed_link::FeedLink;
