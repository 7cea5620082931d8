//! Handlers for annotations.
//!
//! Creating a `category` annotation runs the gated check-then-insert
//! sequence: the handler claims the `(video_id, frame_num, label)` lease
//! before its first store round trip, checks for an existing record, and
//! only then inserts. A duplicate is an informational outcome (HTTP 200,
//! `created: false`), not an error.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use clipmark_core::annotation::{
    validate_color_hex, validate_frame_num, validate_kind, validate_label, KIND_CATEGORY,
};
use clipmark_core::error::CoreError;
use clipmark_core::gate::AnnotationKey;
use clipmark_core::types::DbId;
use clipmark_db::models::annotation::{
    Annotation, AnnotationFilters, CreateAnnotation, ReplaceAnnotation, UpdateAnnotation,
};
use clipmark_db::repositories::{AnnotationRepo, VideoRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::project::ensure_project_exists;
use crate::handlers::video::find_video_or_404;
use crate::response::{DataResponse, ReplaceResponse};
use crate::state::AppState;

/// Create-annotation result: the stored row plus whether this request
/// created it or found it already present.
#[derive(Debug, Serialize)]
pub struct CreateOutcome {
    pub created: bool,
    pub annotation: Annotation,
}

/// Validate the fields shared by create and replace payloads.
fn validate_annotation_fields(
    frame_num: i32,
    kind: &str,
    label: &str,
    color: Option<&str>,
) -> AppResult<()> {
    validate_frame_num(frame_num).map_err(AppError::Core)?;
    validate_kind(kind).map_err(AppError::Core)?;
    validate_label(label).map_err(AppError::Core)?;
    if let Some(color) = color {
        validate_color_hex(color).map_err(AppError::Core)?;
    }
    Ok(())
}

/// GET /api/v1/videos/{id}/annotations
///
/// List a video's annotations with optional `frame_num`, `kind`, and
/// `label` filters.
pub async fn list(
    State(state): State<AppState>,
    Path(video_id): Path<DbId>,
    Query(filters): Query<AnnotationFilters>,
) -> AppResult<impl IntoResponse> {
    let annotations = AnnotationRepo::list_by_video(&state.pool, video_id, &filters).await?;
    Ok(Json(DataResponse { data: annotations }))
}

/// POST /api/v1/videos/{id}/annotations
pub async fn create(
    State(state): State<AppState>,
    Path(video_id): Path<DbId>,
    Json(input): Json<CreateAnnotation>,
) -> AppResult<impl IntoResponse> {
    find_video_or_404(&state.pool, video_id).await?;
    validate_annotation_fields(input.frame_num, &input.kind, &input.label, input.color.as_deref())?;

    if input.kind == KIND_CATEGORY {
        return create_category(state, video_id, input).await;
    }

    let annotation = AnnotationRepo::create(&state.pool, video_id, &input).await?;

    tracing::info!(
        video_id,
        annotation_id = annotation.id,
        frame_num = input.frame_num,
        "Annotation created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreateOutcome {
                created: true,
                annotation,
            },
        }),
    ))
}

/// The gated check-then-insert path for category annotations.
///
/// The lease is claimed before the existence check and held until this
/// function returns; at most one in-process caller per key observes
/// "absent" and inserts.
async fn create_category(
    state: AppState,
    video_id: DbId,
    input: CreateAnnotation,
) -> AppResult<(StatusCode, Json<DataResponse<CreateOutcome>>)> {
    let key = AnnotationKey {
        video_id,
        frame_num: input.frame_num,
        label: input.label.clone(),
    };
    let _lease = state.insert_gate.acquire(&key).await.map_err(AppError::Core)?;

    if let Some(existing) =
        AnnotationRepo::find_category(&state.pool, video_id, input.frame_num, &input.label).await?
    {
        tracing::debug!(
            video_id,
            frame_num = input.frame_num,
            label = %input.label,
            "Category annotation already present"
        );
        return Ok((
            StatusCode::OK,
            Json(DataResponse {
                data: CreateOutcome {
                    created: false,
                    annotation: existing,
                },
            }),
        ));
    }

    let annotation = AnnotationRepo::create(&state.pool, video_id, &input).await?;

    tracing::info!(
        video_id,
        annotation_id = annotation.id,
        frame_num = input.frame_num,
        label = %input.label,
        "Category annotation created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreateOutcome {
                created: true,
                annotation,
            },
        }),
    ))
}

/// PUT /api/v1/annotations/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAnnotation>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref label) = input.label {
        validate_label(label).map_err(AppError::Core)?;
    }
    if let Some(ref color) = input.color {
        validate_color_hex(color).map_err(AppError::Core)?;
    }

    let annotation = AnnotationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Annotation",
            id,
        }))?;

    tracing::info!(annotation_id = id, "Annotation updated");

    Ok(Json(DataResponse { data: annotation }))
}

/// DELETE /api/v1/annotations/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = AnnotationRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Annotation",
            id,
        }));
    }

    tracing::info!(annotation_id = id, "Annotation deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/projects/{id}/annotations
///
/// Replace every annotation across the project's videos with the request
/// body's list. Each candidate names its video; targets outside the project
/// are rejected before anything is deleted.
pub async fn replace_for_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(candidates): Json<Vec<ReplaceAnnotation>>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;

    let video_ids = VideoRepo::ids_by_project(&state.pool, project_id).await?;

    for candidate in &candidates {
        validate_annotation_fields(
            candidate.frame_num,
            &candidate.kind,
            &candidate.label,
            candidate.color.as_deref(),
        )?;
        if !video_ids.contains(&candidate.video_id) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Annotation targets video {} which is not in project {project_id}",
                candidate.video_id
            ))));
        }
    }

    let report = AnnotationRepo::replace_for_videos(&state.pool, &video_ids, &candidates).await?;

    if report.is_complete() {
        tracing::info!(
            project_id,
            deleted = report.deleted,
            inserted = report.inserted,
            "Annotations replaced"
        );
    } else {
        tracing::warn!(
            project_id,
            requested = report.requested,
            deleted = report.deleted,
            inserted = report.inserted,
            "Annotation replace incomplete"
        );
    }

    Ok(Json(DataResponse {
        data: ReplaceResponse::from(report),
    }))
}
