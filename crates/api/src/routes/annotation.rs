//! Route definitions for annotations addressed by their own ID.
//!
//! Listing and creation are nested under `/videos/{id}/annotations`; the
//! project-wide replace lives under `/projects/{id}/annotations`.

use axum::routing::put;
use axum::Router;

use crate::handlers::annotation;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/annotations/{id}",
        put(annotation::update).delete(annotation::delete),
    )
}
