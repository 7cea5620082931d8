//! Cache of loaded auxiliary series.
//!
//! Series files are parsed once per `(video_id, name)` pair and shared
//! behind `Arc` afterwards; window requests slice the cached samples. An
//! entry is dropped when its video's descriptor changes or the video is
//! deleted.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use clipmark_core::series::{self, SampleSeries, SeriesError};
use clipmark_core::types::DbId;
use tokio::sync::RwLock;

/// Key for one cached series: the video and the additional-field name.
type SeriesKey = (DbId, String);

/// Manages loaded series for all videos.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
#[derive(Debug, Default)]
pub struct SeriesCache {
    entries: RwLock<HashMap<SeriesKey, Arc<SampleSeries>>>,
}

impl SeriesCache {
    /// Create a new, empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached series for `(video_id, name)`, loading it from
    /// `path` on first use.
    ///
    /// Two concurrent misses may both load the file; the second write wins
    /// and both callers get a consistent snapshot.
    pub async fn get_or_load(
        &self,
        video_id: DbId,
        name: &str,
        path: &Path,
    ) -> Result<Arc<SampleSeries>, SeriesError> {
        let key = (video_id, name.to_string());

        if let Some(series) = self.entries.read().await.get(&key) {
            return Ok(Arc::clone(series));
        }

        let series = Arc::new(series::load_series(name, path).await?);
        self.entries
            .write()
            .await
            .insert(key, Arc::clone(&series));

        tracing::debug!(video_id, name, frames = series.len(), "Series loaded");
        Ok(series)
    }

    /// Drop every cached series for a video. Called when the video's
    /// additional fields change or the video is deleted.
    pub async fn invalidate_video(&self, video_id: DbId) {
        self.entries
            .write()
            .await
            .retain(|(id, _), _| *id != video_id);
    }
}
