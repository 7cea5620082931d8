//! Handlers for per-project button groups.
//!
//! The client owns a project's full palette: groups are listed as a set and
//! replaced as a set.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use clipmark_core::buttons::{validate_buttons_json, validate_group_name};
use clipmark_core::types::DbId;
use clipmark_db::models::button_group::CreateButtonGroup;
use clipmark_db::repositories::ButtonGroupRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::project::ensure_project_exists;
use crate::response::{DataResponse, ReplaceResponse};
use crate::state::AppState;

/// GET /api/v1/projects/{id}/button-groups
pub async fn list(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;
    let groups = ButtonGroupRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: groups }))
}

/// PUT /api/v1/projects/{id}/button-groups
///
/// Replace the project's button groups with the request body's list.
pub async fn replace_for_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(candidates): Json<Vec<CreateButtonGroup>>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;
    for candidate in &candidates {
        validate_group_name(&candidate.name).map_err(AppError::Core)?;
        validate_buttons_json(&candidate.buttons).map_err(AppError::Core)?;
    }

    let report = ButtonGroupRepo::replace_for_project(&state.pool, project_id, &candidates).await?;

    if report.is_complete() {
        tracing::info!(
            project_id,
            deleted = report.deleted,
            inserted = report.inserted,
            "Button groups replaced"
        );
    } else {
        tracing::warn!(
            project_id,
            requested = report.requested,
            deleted = report.deleted,
            inserted = report.inserted,
            "Button group replace incomplete"
        );
    }

    Ok(Json(DataResponse {
        data: ReplaceResponse::from(report),
    }))
}
