mod common;

use axum::http::StatusCode;
use common::{admin_token, spawn_app, token_for};
use moviebox::infrastructure::storage::{KeyValueStore, MOVIES_KEY};
use serde_json::json;

#[tokio::test]
async fn health_is_public() {
    let app = spawn_app().await;
    let (status, _) = app.get("/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn catalog_is_seeded_and_filterable() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/v1/movies", None).await;
    assert_eq!(status, StatusCode::OK);
    let all = body["data"].as_array().unwrap().len();
    assert!(all > 0);

    let (_, body) = app.get("/api/v1/movies?category=Drama", None).await;
    let dramas = body["data"].as_array().unwrap();
    assert!(!dramas.is_empty());
    assert!(dramas.iter().all(|m| m["movie"]["category"] == "Drama"));

    let (_, body) = app.get("/api/v1/movies?search=betrayed", None).await;
    assert_eq!(body["data"][0]["movie"]["id"], "1");

    let (status, body) = app.get("/api/v1/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0], "All");
}

#[tokio::test]
async fn admin_adds_drive_movie_then_removes_it() {
    let app = spawn_app().await;
    let admin = admin_token();

    let (status, body) = app
        .post(
            "/api/v1/admin/movies",
            Some(&admin),
            json!({
                "title": "Drive Upload",
                "video_url": "https://drive.google.com/file/d/ABC123/view",
                "category": "Drama",
                "orientation": "landscape"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body["data"]["movie"]["video_url"],
        "https://drive.google.com/uc?export=view&id=ABC123"
    );
    assert_eq!(body["data"]["source"], "gdrive");
    assert!(body["data"]["playback_warning"].is_string());

    let id = body["data"]["movie"]["id"].as_str().unwrap().to_string();

    // Written through to the store.
    let raw = app.store.get_item(MOVIES_KEY).await.unwrap().unwrap();
    assert!(raw.contains(&id));

    let (status, _) = app.get(&format!("/api/v1/movies/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .delete(&format!("/api/v1/admin/movies/{}", id), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get(&format!("/api/v1/movies/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn admin_routes_refuse_other_users() {
    let app = spawn_app().await;

    let (status, _) = app
        .post("/api/v1/admin/movies", None, json!({ "title": "x", "video_url": "y" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let viewer = token_for("viewer-1", "viewer@moviebox.app");
    let (status, body) = app
        .post("/api/v1/admin/movies", Some(&viewer), json!({ "title": "x", "video_url": "y" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden: Admin access required");
}

#[tokio::test]
async fn missing_title_is_rejected() {
    let app = spawn_app().await;
    let (status, body) = app
        .post(
            "/api/v1/admin/movies",
            Some(&admin_token()),
            json!({ "title": "", "video_url": "https://cdn.example.com/a.mp4" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Title is required");
}

#[tokio::test]
async fn me_reports_admin_flag() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/v1/auth/me", Some(&admin_token())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_admin"], true);

    let viewer = token_for("viewer-1", "viewer@moviebox.app");
    let (_, body) = app.get("/api/v1/auth/me", Some(&viewer)).await;
    assert_eq!(body["data"]["is_admin"], false);
    assert_eq!(body["data"]["has_seen_landing"], false);

    let (status, _) = app.get("/api/v1/auth/me", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
