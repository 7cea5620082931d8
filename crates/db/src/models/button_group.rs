//! Button-group model and DTOs.
//!
//! Button groups are replaced wholesale from the client's project
//! configuration, so there is no per-row update DTO.

use clipmark_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A button-group row from the `button_groups` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ButtonGroup {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    /// JSONB array of `{ label, color? }` objects; see
    /// `clipmark_core::buttons::validate_buttons_json`.
    pub buttons: serde_json::Value,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for one button group in a replace-all request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateButtonGroup {
    pub name: String,
    pub buttons: serde_json::Value,
    /// Defaults to the group's position in the request.
    pub sort_order: Option<i32>,
}
