mod common;

use axum::http::StatusCode;
use serde_json::json;

/// Video CRUD under a project.
#[sqlx::test(migrations = "../../db/migrations")]
async fn video_crud_round_trip(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let project_id = common::create_project(&app, "Trials").await;

    let response = common::post_json(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/videos"),
        json!({
            "name": "trial-01.mp4",
            "path": "/data/videos/trial-01.mp4",
            "additional_fields": [
                { "name": "canvas1", "value": "/data/videos/trial-01.traj.json" }
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::body_json(response).await;
    let video_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["project_id"].as_i64().unwrap(), project_id);

    // Rename.
    let response = common::put_json(
        app.clone(),
        &format!("/api/v1/videos/{video_id}"),
        json!({ "name": "trial-01-redo.mp4" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["name"], "trial-01-redo.mp4");
    assert_eq!(body["data"]["path"], "/data/videos/trial-01.mp4");

    // Delete.
    let response = common::delete(app.clone(), &format!("/api/v1/videos/{video_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = common::get(app, &format!("/api/v1/projects/{project_id}/videos")).await;
    let body = common::body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

/// Duplicate additional-field names are rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_additional_field_names_rejected(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let project_id = common::create_project(&app, "Trials").await;

    let response = common::post_json(
        app,
        &format!("/api/v1/projects/{project_id}/videos"),
        json!({
            "name": "trial-01.mp4",
            "path": "/data/videos/trial-01.mp4",
            "additional_fields": [
                { "name": "chart1", "value": "a.csv" },
                { "name": "chart1", "value": "b.csv" }
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Replace-all swaps the project's videos and reports verified counts.
#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_all_swaps_videos(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let project_id = common::create_project(&app, "Trials").await;
    common::create_video(&app, project_id, "old-1.mp4").await;
    common::create_video(&app, project_id, "old-2.mp4").await;

    let response = common::put_json(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/videos"),
        json!([
            { "name": "new-1.mp4", "path": "/data/new-1.mp4" },
            { "name": "new-2.mp4", "path": "/data/new-2.mp4" },
            { "name": "new-3.mp4", "path": "/data/new-3.mp4" }
        ]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["success"], true);
    assert_eq!(body["data"]["deleted_count"], 2);
    assert_eq!(body["data"]["inserted_count"], 3);
    assert_eq!(body["data"]["requested_count"], 3);

    let response = common::get(app, &format!("/api/v1/projects/{project_id}/videos")).await;
    let body = common::body_json(response).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["new-1.mp4", "new-2.mp4", "new-3.mp4"]);
}

/// Replacing with an empty list leaves the project empty.
#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_all_with_empty_list_clears(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let project_id = common::create_project(&app, "Trials").await;
    common::create_video(&app, project_id, "old-1.mp4").await;

    let response = common::put_json(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/videos"),
        json!([]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["success"], true);
    assert_eq!(body["data"]["deleted_count"], 1);
    assert_eq!(body["data"]["inserted_count"], 0);

    let response = common::get(app, &format!("/api/v1/projects/{project_id}/videos")).await;
    let body = common::body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

/// Metadata for a video whose file does not exist returns 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn metadata_missing_file_returns_404(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let project_id = common::create_project(&app, "Trials").await;
    let video_id = common::create_video(&app, project_id, "ghost.mp4").await;

    let response = common::get(app, &format!("/api/v1/videos/{video_id}/metadata")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Frame and metadata endpoints 404 for an unknown video row.
#[sqlx::test(migrations = "../../db/migrations")]
async fn media_endpoints_unknown_video_return_404(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app.clone(), "/api/v1/videos/999999/metadata").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = common::get(app, "/api/v1/videos/999999/frames/0").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
