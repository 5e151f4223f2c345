//! GData batch protocol: several insert/update/delete/query operations sent
//! in one feed, with per-entry results correlated by batch id.

mod entry;
mod feed;
mod types;

pub use entry::{BatchEntry, BatchEntryField};
pub use feed::BatchFeed;
pub use types::{BatchId, BatchInterrupted, BatchOperation, BatchOperationType, BatchStatus};
