//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })` to get
//! compile-time type safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Response payload for replace-all endpoints.
///
/// `success` is derived from the independently re-read post-insert count,
/// not from the insert acknowledgement.
#[derive(Debug, Serialize)]
pub struct ReplaceResponse {
    pub success: bool,
    pub requested_count: i64,
    pub deleted_count: i64,
    pub inserted_count: i64,
}

impl From<clipmark_core::sync::ReplaceReport> for ReplaceResponse {
    fn from(report: clipmark_core::sync::ReplaceReport) -> Self {
        Self {
            success: report.is_complete(),
            requested_count: report.requested,
            deleted_count: report.deleted,
            inserted_count: report.inserted,
        }
    }
}
