//! Repository for the `videos` table, including the project-scoped
//! replace-all synchronizer.

use clipmark_core::sync::ReplaceReport;
use clipmark_core::types::DbId;
use sqlx::PgPool;

use crate::models::video::{CreateVideo, UpdateVideo, Video};

/// Column list for videos queries.
const COLUMNS: &str = "id, project_id, name, path, additional_fields, created_at, updated_at";

/// Provides CRUD and replace-all operations for videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video under a project, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateVideo,
    ) -> Result<Video, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos (project_id, name, path, additional_fields)
             VALUES ($1, $2, $3, COALESCE($4, '[]'::jsonb))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.path)
            .bind(&input.additional_fields)
            .fetch_one(pool)
            .await
    }

    /// Find a video by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all videos in a project, ordered by creation.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM videos
             WHERE project_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// IDs of every video in a project. Used to scope annotation queries.
    pub async fn ids_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as("SELECT id FROM videos WHERE project_id = $1")
            .bind(project_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Update a video. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVideo,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET
                name = COALESCE($2, name),
                path = COALESCE($3, path),
                additional_fields = COALESCE($4, additional_fields)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.path)
            .bind(&input.additional_fields)
            .fetch_optional(pool)
            .await
    }

    /// Delete a video by ID. Cascades to its annotations. Returns `true` if
    /// a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count the videos in a project.
    pub async fn count_by_project(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM videos WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Replace every video in a project with the candidate list.
    ///
    /// Delete and insert run in one transaction, so a mid-replace failure
    /// rolls back to the prior set. The reported `inserted` count is not the
    /// insert acknowledgement: it is re-read from the store after commit, and
    /// the caller's success flag derives from comparing it to `requested`.
    pub async fn replace_for_project(
        pool: &PgPool,
        project_id: DbId,
        candidates: &[CreateVideo],
    ) -> Result<ReplaceReport, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM videos WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?
            .rows_affected() as i64;

        for candidate in candidates {
            sqlx::query(
                "INSERT INTO videos (project_id, name, path, additional_fields)
                 VALUES ($1, $2, $3, COALESCE($4, '[]'::jsonb))",
            )
            .bind(project_id)
            .bind(&candidate.name)
            .bind(&candidate.path)
            .bind(&candidate.additional_fields)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        let inserted = Self::count_by_project(pool, project_id).await?;

        Ok(ReplaceReport {
            requested: candidates.len() as i64,
            deleted,
            inserted,
        })
    }
}
