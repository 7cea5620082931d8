//! Annotation model and DTOs.

use clipmark_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An annotation row from the `annotations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Annotation {
    pub id: DbId,
    pub video_id: DbId,
    /// 0-indexed frame the annotation sits on.
    pub frame_num: i32,
    /// `category` or `marker`; see `clipmark_core::annotation`.
    pub kind: String,
    pub label: String,
    pub color: Option<String>,
    pub data: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new annotation on a video.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnotation {
    pub frame_num: i32,
    pub kind: String,
    pub label: String,
    pub color: Option<String>,
    pub data: Option<serde_json::Value>,
}

/// DTO for one annotation in a project-wide replace-all request. Carries its
/// video explicitly since the owner scope spans every video in the project.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceAnnotation {
    pub video_id: DbId,
    pub frame_num: i32,
    pub kind: String,
    pub label: String,
    pub color: Option<String>,
    pub data: Option<serde_json::Value>,
}

/// DTO for updating an existing annotation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAnnotation {
    pub label: Option<String>,
    pub color: Option<String>,
    pub data: Option<serde_json::Value>,
}

/// Optional filters when listing a video's annotations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnotationFilters {
    pub frame_num: Option<i32>,
    pub kind: Option<String>,
    pub label: Option<String>,
}
