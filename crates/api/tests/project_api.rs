mod common;

use axum::http::StatusCode;
use serde_json::json;

/// Full project CRUD round trip.
#[sqlx::test(migrations = "../../db/migrations")]
async fn project_crud_round_trip(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);

    // Create.
    let response = common::post_json(
        app.clone(),
        "/api/v1/projects",
        json!({ "name": "Open field", "description": "Mouse trials" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = common::body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["name"], "Open field");

    // Get.
    let response = common::get(app.clone(), &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    // List contains it.
    let response = common::get(app.clone(), "/api/v1/projects").await;
    let list = common::body_json(response).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);

    // Update description only; name survives.
    let response = common::put_json(
        app.clone(),
        &format!("/api/v1/projects/{id}"),
        json!({ "description": "Mouse trials, cohort 2" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = common::body_json(response).await;
    assert_eq!(updated["data"]["name"], "Open field");
    assert_eq!(updated["data"]["description"], "Mouse trials, cohort 2");

    // Delete.
    let response = common::delete(app.clone(), &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = common::get(app, &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Overlong names are rejected with a validation error.
#[sqlx::test(migrations = "../../db/migrations")]
async fn overlong_project_name_rejected(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let response = common::post_json(
        app,
        "/api/v1/projects",
        json!({ "name": "n".repeat(201) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

/// Empty names are rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_project_name_rejected(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let response =
        common::post_json(app, "/api/v1/projects", json!({ "name": "   " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Missing projects 404 on every verb.
#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_project_returns_404(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app.clone(), "/api/v1/projects/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = common::put_json(
        app.clone(),
        "/api/v1/projects/999999",
        json!({ "name": "renamed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = common::delete(app, "/api/v1/projects/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Deleting a project cascades to its videos.
#[sqlx::test(migrations = "../../db/migrations")]
async fn project_delete_cascades_to_videos(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);

    let project_id = common::create_project(&app, "Cascade").await;
    let video_id = common::create_video(&app, project_id, "trial-01.mp4").await;

    let response = common::delete(app.clone(), &format!("/api/v1/projects/{project_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = common::get(app, &format!("/api/v1/videos/{video_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
