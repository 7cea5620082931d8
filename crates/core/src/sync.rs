//! Result shape for replace-all synchronization.
//!
//! A replace-all swaps every record scoped to an owner (a project, or a
//! project's set of videos) for a candidate list. The store's insert
//! acknowledgement is not trusted on its own: the post-insert count is
//! re-read from the store and compared against the requested count.

use serde::Serialize;

/// Counts observed while replacing an owner's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReplaceReport {
    /// How many records the caller asked to insert.
    pub requested: i64,
    /// How many prior records were removed.
    pub deleted: i64,
    /// How many records the owner scope holds after the insert, obtained by
    /// an independent re-read.
    pub inserted: i64,
}

impl ReplaceReport {
    /// A replace is complete when the re-read count matches the request.
    pub fn is_complete(&self) -> bool {
        self.inserted == self.requested
    }
}
