pub mod annotation;
pub mod health;
pub mod project;
pub mod video;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                          list, create
/// /projects/{id}                     get, update, delete
/// /projects/{id}/videos              list, create, replace-all (PUT)
/// /projects/{id}/button-groups       list, replace-all (PUT)
/// /projects/{id}/annotations         replace-all (PUT)
///
/// /videos/{id}                       get, update, delete
/// /videos/{id}/metadata              probed frame count / fps / dimensions
/// /videos/{id}/frames/{index}        single frame as JPEG
/// /videos/{id}/series/{name}         windowed auxiliary samples
/// /videos/{id}/annotations           list, create
///
/// /annotations/{id}                  update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(project::router())
        .merge(video::router())
        .merge(annotation::router())
}
