//! Handler for windowed auxiliary-series reads.
//!
//! `GET /videos/{id}/series/{name}` resolves the named additional field on
//! the video, loads (or reuses) its sample series, and returns the clamped
//! window of samples around the requested frame.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use clipmark_core::types::DbId;
use clipmark_core::video::{find_additional_field, parse_additional_fields};

use crate::error::{AppError, AppResult};
use crate::handlers::video::find_video_or_404;
use crate::response::DataResponse;
use crate::state::AppState;

/// Samples served on either side of the requested frame when the client
/// does not say otherwise. Matches the chart window of the annotation UI.
pub const DEFAULT_HALF_WIDTH: u32 = 20;

#[derive(Debug, Deserialize)]
pub struct WindowParams {
    /// Center frame of the window.
    pub frame: i64,
    /// Samples on either side of the center; defaults to
    /// [`DEFAULT_HALF_WIDTH`].
    pub half_width: Option<u32>,
}

/// One windowed slice of a named series.
#[derive(Debug, Serialize)]
pub struct SeriesWindowPayload {
    pub name: String,
    /// First frame index covered (inclusive).
    pub start: usize,
    /// Last frame index covered (inclusive).
    pub end: usize,
    pub samples: Vec<serde_json::Value>,
}

/// GET /api/v1/videos/{id}/series/{name}?frame=&half_width=
pub async fn window(
    State(state): State<AppState>,
    Path((video_id, name)): Path<(DbId, String)>,
    Query(params): Query<WindowParams>,
) -> AppResult<impl IntoResponse> {
    let video = find_video_or_404(&state.pool, video_id).await?;

    let fields = parse_additional_fields(&video.additional_fields).map_err(AppError::Core)?;
    let field = find_additional_field(&fields, &name).ok_or_else(|| {
        AppError::BadRequest(format!("Video {video_id} has no additional field named '{name}'"))
    })?;
    let file_path = field.value.as_deref().ok_or_else(|| {
        AppError::BadRequest(format!("Additional field '{name}' has no data file"))
    })?;

    let series = state
        .series_cache
        .get_or_load(video_id, &name, std::path::Path::new(file_path))
        .await?;

    let half_width = params.half_width.unwrap_or(DEFAULT_HALF_WIDTH);
    let window = series
        .window(params.frame, half_width)
        .map_err(AppError::Core)?;

    Ok(Json(DataResponse {
        data: SeriesWindowPayload {
            name,
            start: window.start,
            end: window.end,
            samples: window.samples.to_vec(),
        },
    }))
}
