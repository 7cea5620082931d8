//! Handlers for the `/videos` resource.
//!
//! CRUD plus the project-scoped replace-all, ffprobe-backed metadata, and
//! single-frame decoding.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use clipmark_core::error::CoreError;
use clipmark_core::types::DbId;
use clipmark_core::{ffmpeg, video as video_rules};
use clipmark_db::models::video::{CreateVideo, UpdateVideo, Video};
use clipmark_db::repositories::VideoRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::project::ensure_project_exists;
use crate::response::{DataResponse, ReplaceResponse};
use crate::state::AppState;

/// Return the video or 404.
pub async fn find_video_or_404(pool: &sqlx::PgPool, id: DbId) -> AppResult<Video> {
    VideoRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Video", id }))
}

/// Validate the mutable fields of a video payload.
fn validate_video_input(
    name: Option<&str>,
    path: Option<&str>,
    additional_fields: Option<&serde_json::Value>,
) -> AppResult<()> {
    if let Some(name) = name {
        video_rules::validate_name(name).map_err(AppError::Core)?;
    }
    if let Some(path) = path {
        video_rules::validate_path(path).map_err(AppError::Core)?;
    }
    if let Some(fields) = additional_fields {
        video_rules::parse_additional_fields(fields).map_err(AppError::Core)?;
    }
    Ok(())
}

/// POST /api/v1/projects/{id}/videos
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateVideo>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;
    validate_video_input(
        Some(&input.name),
        Some(&input.path),
        input.additional_fields.as_ref(),
    )?;

    let video = VideoRepo::create(&state.pool, project_id, &input).await?;

    tracing::info!(project_id, video_id = video.id, name = %video.name, "Video created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: video })))
}

/// GET /api/v1/projects/{id}/videos
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;
    let videos = VideoRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: videos }))
}

/// PUT /api/v1/projects/{id}/videos
///
/// Replace every video in the project with the request body's list. The
/// response's `success` derives from the independently re-read post-insert
/// count; on `false` the counts are reported and nothing is rolled back.
pub async fn replace_for_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(candidates): Json<Vec<CreateVideo>>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;
    for candidate in &candidates {
        validate_video_input(
            Some(&candidate.name),
            Some(&candidate.path),
            candidate.additional_fields.as_ref(),
        )?;
    }

    // The old rows (and their cached series) are about to disappear.
    let old_ids = VideoRepo::ids_by_project(&state.pool, project_id).await?;

    let report = VideoRepo::replace_for_project(&state.pool, project_id, &candidates).await?;

    for video_id in old_ids {
        state.series_cache.invalidate_video(video_id).await;
    }

    if report.is_complete() {
        tracing::info!(
            project_id,
            deleted = report.deleted,
            inserted = report.inserted,
            "Videos replaced"
        );
    } else {
        tracing::warn!(
            project_id,
            requested = report.requested,
            deleted = report.deleted,
            inserted = report.inserted,
            "Video replace incomplete"
        );
    }

    Ok(Json(DataResponse {
        data: ReplaceResponse::from(report),
    }))
}

/// GET /api/v1/videos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let video = find_video_or_404(&state.pool, id).await?;
    Ok(Json(DataResponse { data: video }))
}

/// PUT /api/v1/videos/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVideo>,
) -> AppResult<impl IntoResponse> {
    validate_video_input(
        input.name.as_deref(),
        input.path.as_deref(),
        input.additional_fields.as_ref(),
    )?;

    let video = VideoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Video", id }))?;

    // The descriptors may now point at different files.
    if input.additional_fields.is_some() || input.path.is_some() {
        state.series_cache.invalidate_video(id).await;
    }

    tracing::info!(video_id = id, "Video updated");

    Ok(Json(DataResponse { data: video }))
}

/// DELETE /api/v1/videos/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = VideoRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Video", id }));
    }

    state.series_cache.invalidate_video(id).await;

    tracing::info!(video_id = id, "Video deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/videos/{id}/metadata
///
/// Probe the video file and return frame count, fps, dimensions, and
/// duration.
pub async fn metadata(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let video = find_video_or_404(&state.pool, id).await?;
    let probe = ffmpeg::probe(std::path::Path::new(&video.path)).await?;
    Ok(Json(DataResponse { data: probe }))
}

/// GET /api/v1/videos/{id}/frames/{index}
///
/// Decode the frame at `index` to JPEG bytes. The index must lie within
/// `[0, frame_count - 1]` of the probed file.
pub async fn frame(
    State(state): State<AppState>,
    Path((id, index)): Path<(DbId, i64)>,
) -> AppResult<impl IntoResponse> {
    let video = find_video_or_404(&state.pool, id).await?;

    let media_path = std::path::Path::new(&video.path);
    let probe = ffmpeg::probe(media_path).await?;

    if index < 0 || index >= probe.frame_count {
        return Err(AppError::Core(CoreError::FrameOutOfRange {
            frame: index,
            last: probe.frame_count - 1,
        }));
    }

    let timestamp = probe.timestamp_for_frame(index);
    let bytes = ffmpeg::extract_frame_jpeg(media_path, timestamp).await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/jpeg")],
        bytes,
    ))
}
