//! Domain-level error type shared across the workspace.

use crate::types::DbId;

/// Errors produced by domain logic.
///
/// The API layer maps these to HTTP responses; repositories and handlers
/// propagate them with `?`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup found nothing.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A request payload failed a validation rule.
    #[error("{0}")]
    Validation(String),

    /// A state conflict (duplicate name, concurrent modification).
    #[error("{0}")]
    Conflict(String),

    /// A requested frame index lies outside the addressable range of its
    /// sequence. `last` is the highest valid index.
    #[error("frame {frame} is out of range (valid range is 0..={last})")]
    FrameOutOfRange { frame: i64, last: i64 },

    /// The insert gate stayed busy through every retry attempt.
    #[error("insert gate for {0} is contended; retry later")]
    LeaseContended(String),

    /// An unexpected internal failure.
    #[error("{0}")]
    Internal(String),
}
