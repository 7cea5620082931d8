//! Repository for the `annotations` table.
//!
//! The category existence check here is only half of the uniqueness story:
//! the table has no unique index on `(video_id, frame_num, label)`, so the
//! caller must hold the insert gate for that triple across
//! `find_category` + `create` (see `clipmark_core::gate`).

use clipmark_core::sync::ReplaceReport;
use clipmark_core::types::DbId;
use sqlx::PgPool;

use crate::models::annotation::{
    Annotation, AnnotationFilters, CreateAnnotation, ReplaceAnnotation, UpdateAnnotation,
};

/// Column list for annotations queries.
const COLUMNS: &str =
    "id, video_id, frame_num, kind, label, color, data, created_at, updated_at";

/// Provides CRUD, category-lookup, and replace-all operations for
/// annotations.
pub struct AnnotationRepo;

impl AnnotationRepo {
    /// Insert a new annotation, returning the created row.
    pub async fn create(
        pool: &PgPool,
        video_id: DbId,
        input: &CreateAnnotation,
    ) -> Result<Annotation, sqlx::Error> {
        let query = format!(
            "INSERT INTO annotations (video_id, frame_num, kind, label, color, data)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(video_id)
            .bind(input.frame_num)
            .bind(&input.kind)
            .bind(&input.label)
            .bind(&input.color)
            .bind(&input.data)
            .fetch_one(pool)
            .await
    }

    /// Find an annotation by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM annotations WHERE id = $1");
        sqlx::query_as::<_, Annotation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a video's annotations with optional frame/kind/label filters,
    /// ordered by frame number.
    pub async fn list_by_video(
        pool: &PgPool,
        video_id: DbId,
        filters: &AnnotationFilters,
    ) -> Result<Vec<Annotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotations
             WHERE video_id = $1
               AND ($2::int IS NULL OR frame_num = $2)
               AND ($3::varchar IS NULL OR kind = $3)
               AND ($4::varchar IS NULL OR label = $4)
             ORDER BY frame_num ASC, id ASC"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(video_id)
            .bind(filters.frame_num)
            .bind(&filters.kind)
            .bind(&filters.label)
            .fetch_all(pool)
            .await
    }

    /// Find the category annotation for a `(video, frame, label)` triple.
    ///
    /// This is the existence check of the gated insert sequence; callers
    /// must hold the triple's insert lease when using it to decide whether
    /// to create.
    pub async fn find_category(
        pool: &PgPool,
        video_id: DbId,
        frame_num: i32,
        label: &str,
    ) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotations
             WHERE video_id = $1 AND frame_num = $2 AND label = $3 AND kind = 'category'
             LIMIT 1"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(video_id)
            .bind(frame_num)
            .bind(label)
            .fetch_optional(pool)
            .await
    }

    /// Update an annotation's label, color, or data.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAnnotation,
    ) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!(
            "UPDATE annotations SET
                label = COALESCE($2, label),
                color = COALESCE($3, color),
                data = COALESCE($4, data)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(id)
            .bind(&input.label)
            .bind(&input.color)
            .bind(&input.data)
            .fetch_optional(pool)
            .await
    }

    /// Delete an annotation by its ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM annotations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count the annotations across a set of videos.
    pub async fn count_by_videos(pool: &PgPool, video_ids: &[DbId]) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM annotations WHERE video_id = ANY($1)")
                .bind(video_ids)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Replace every annotation across the given videos with the candidate
    /// list.
    ///
    /// The owner scope is a set of video IDs (a project's videos); each
    /// candidate names its own video. The caller validates that every
    /// candidate's `video_id` is inside the scope before calling. Delete and
    /// insert run in one transaction; the `inserted` count is re-read after
    /// commit (see `VideoRepo::replace_for_project`).
    pub async fn replace_for_videos(
        pool: &PgPool,
        video_ids: &[DbId],
        candidates: &[ReplaceAnnotation],
    ) -> Result<ReplaceReport, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM annotations WHERE video_id = ANY($1)")
            .bind(video_ids)
            .execute(&mut *tx)
            .await?
            .rows_affected() as i64;

        for candidate in candidates {
            sqlx::query(
                "INSERT INTO annotations (video_id, frame_num, kind, label, color, data)
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(candidate.video_id)
            .bind(candidate.frame_num)
            .bind(&candidate.kind)
            .bind(&candidate.label)
            .bind(&candidate.color)
            .bind(&candidate.data)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        let inserted = Self::count_by_videos(pool, video_ids).await?;

        Ok(ReplaceReport {
            requested: candidates.len() as i64,
            deleted,
            inserted,
        })
    }
}
