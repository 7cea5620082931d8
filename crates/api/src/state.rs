use std::sync::Arc;

use clipmark_core::gate::InsertGate;

use crate::config::ServerConfig;
use crate::series_cache::SeriesCache;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: clipmark_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-key lease map serializing category-annotation inserts.
    /// Process-local: one instance per API process.
    pub insert_gate: Arc<InsertGate>,
    /// Loaded auxiliary series, cached per `(video_id, name)`.
    pub series_cache: Arc<SeriesCache>,
}
