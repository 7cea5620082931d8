//! Video entity model and DTOs.

use clipmark_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A video row from the `videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    /// Filesystem path of the media file.
    pub path: String,
    /// JSONB array of `{ name, value }` auxiliary-series descriptors; see
    /// `clipmark_core::video::parse_additional_fields`.
    pub additional_fields: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new video.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideo {
    pub name: String,
    pub path: String,
    /// Defaults to an empty array if omitted.
    pub additional_fields: Option<serde_json::Value>,
}

/// DTO for updating an existing video. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVideo {
    pub name: Option<String>,
    pub path: Option<String>,
    pub additional_fields: Option<serde_json::Value>,
}
