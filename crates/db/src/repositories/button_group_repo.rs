//! Repository for the `button_groups` table.
//!
//! Button groups are read as a set and replaced as a set; the client owns
//! the full palette for a project.

use clipmark_core::sync::ReplaceReport;
use clipmark_core::types::DbId;
use sqlx::PgPool;

use crate::models::button_group::{ButtonGroup, CreateButtonGroup};

/// Column list for button_groups queries.
const COLUMNS: &str = "id, project_id, name, buttons, sort_order, created_at, updated_at";

/// Provides list and replace-all operations for button groups.
pub struct ButtonGroupRepo;

impl ButtonGroupRepo {
    /// List a project's button groups in display order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ButtonGroup>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM button_groups
             WHERE project_id = $1
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, ButtonGroup>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Count the button groups in a project.
    pub async fn count_by_project(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM button_groups WHERE project_id = $1")
                .bind(project_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Replace every button group in a project with the candidate list.
    ///
    /// Groups missing an explicit `sort_order` take their position in the
    /// candidate list. Delete and insert run in one transaction; the
    /// `inserted` count is re-read after commit (see
    /// `VideoRepo::replace_for_project`).
    pub async fn replace_for_project(
        pool: &PgPool,
        project_id: DbId,
        candidates: &[CreateButtonGroup],
    ) -> Result<ReplaceReport, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM button_groups WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?
            .rows_affected() as i64;

        for (position, candidate) in candidates.iter().enumerate() {
            sqlx::query(
                "INSERT INTO button_groups (project_id, name, buttons, sort_order)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(project_id)
            .bind(&candidate.name)
            .bind(&candidate.buttons)
            .bind(candidate.sort_order.unwrap_or(position as i32))
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
