//! Route definitions for individual videos: CRUD, media probing, frame
//! decoding, auxiliary series windows, and annotations.
//!
//! ```text
//! GET|PUT|DELETE /videos/{id}
//! GET  /videos/{id}/metadata
//! GET  /videos/{id}/frames/{index}
//! GET  /videos/{id}/series/{name}
//! GET|POST /videos/{id}/annotations
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::{annotation, series, video};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/videos/{id}",
            get(video::get_by_id).put(video::update).delete(video::delete),
        )
        .route("/videos/{id}/metadata", get(video::metadata))
        .route("/videos/{id}/frames/{index}", get(video::frame))
        .route("/videos/{id}/series/{name}", get(series::window))
        .route(
            "/videos/{id}/annotations",
            get(annotation::list).post(annotation::create),
        )
}
