//! Route definitions for projects and their owned collections.
//!
//! ```text
//! GET|POST   /projects
//! GET|PUT|DELETE /projects/{id}
//! GET|POST   /projects/{id}/videos
//! PUT        /projects/{id}/videos           replace-all
//! GET|PUT    /projects/{id}/button-groups    list / replace-all
//! PUT        /projects/{id}/annotations      replace-all
//! ```

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{annotation, button_group, project, video};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(project::list).post(project::create))
        .route(
            "/projects/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/projects/{id}/videos",
            get(video::list_by_project)
                .post(video::create)
                .put(video::replace_for_project),
        )
        .route(
            "/projects/{id}/button-groups",
            get(button_group::list).put(button_group::replace_for_project),
        )
        .route(
            "/projects/{id}/annotations",
            put(annotation::replace_for_project),
        )
}
