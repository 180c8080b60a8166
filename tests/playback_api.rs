mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{spawn_app, token_for};
use serde_json::{Value, json};

fn commands(body: &Value) -> Vec<String> {
    body["data"]["commands"]
        .as_array()
        .map(|c| c.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn gate_sends_anonymous_users_to_sign_in() {
    let app = spawn_app().await;

    let (status, body) = app
        .post(
            "/api/v1/playback/sessions",
            None,
            json!({ "content_id": "1", "context": "movie" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "error");
    assert_eq!(body["data"]["decision"], "sign_in");
    assert_eq!(body["data"]["redirect"], "/sign-in");
    assert!(body["data"]["session"].is_null());
}

#[tokio::test]
async fn gate_sends_unsubscribed_users_to_plans() {
    let app = spawn_app().await;
    let viewer = token_for("viewer-1", "viewer@moviebox.app");

    let (status, body) = app
        .post(
            "/api/v1/playback/sessions",
            Some(&viewer),
            json!({ "content_id": "1", "context": "movie" }),
        )
        .await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["data"]["decision"], "subscribe");
    assert_eq!(body["data"]["redirect"], "/subscription");
    assert_eq!(app.state.sessions.len().await, 0);
}

#[tokio::test]
async fn bad_token_is_not_treated_as_anonymous() {
    let app = spawn_app().await;
    let (status, body) = app
        .post(
            "/api/v1/playback/sessions",
            Some("garbage"),
            json!({ "content_id": "1", "context": "movie" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn home_session_plays_tracks_and_completes() {
    let app = spawn_app().await;
    let viewer = token_for("viewer-2", "v2@moviebox.app");
    app.subscribe("viewer-2").await;

    let (status, body) = app
        .post(
            "/api/v1/playback/sessions",
            Some(&viewer),
            json!({ "content_id": "2", "context": "home", "platform": "native" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let session = &body["data"]["session"];
    assert_eq!(session["phase"], "loading");
    assert_eq!(session["resize_mode"], "contain");
    assert_eq!(session["autoplay_pending"], false);
    assert_eq!(session["commands"], json!(["unlock"]));
    let id = session["session_id"].as_str().unwrap().to_string();
    let base = format!("/api/v1/playback/sessions/{}", id);

    let (_, body) = app
        .post(
            &format!("{}/ticks", base),
            Some(&viewer),
            json!({ "is_loaded": true, "position_millis": 0, "duration_millis": 60000 }),
        )
        .await;
    assert_eq!(body["data"]["phase"], "ready");
    assert_eq!(body["data"]["play_state"], "playing");
    assert_eq!(commands(&body), vec!["play"]);

    // Below the tracking floor nothing is written.
    app.post(
        &format!("{}/ticks", base),
        Some(&viewer),
        json!({ "is_loaded": true, "position_millis": 1200, "duration_millis": 60000 }),
    )
    .await;
    let (_, body) = app.get("/api/v1/progress", Some(&viewer)).await;
    assert_eq!(body["data"], json!([]));

    app.post(
        &format!("{}/ticks", base),
        Some(&viewer),
        json!({ "is_loaded": true, "position_millis": 30000, "duration_millis": 60000 }),
    )
    .await;
    let (_, body) = app.get("/api/v1/progress", Some(&viewer)).await;
    assert_eq!(body["data"][0]["video_id"], "2");
    assert_eq!(body["data"][0]["progress"], 0.5);

    let (_, body) = app
        .post(&format!("{}/fullscreen", base), Some(&viewer), json!({}))
        .await;
    assert_eq!(body["data"]["fullscreen"], true);
    assert_eq!(body["data"]["orientation_locked"], true);
    assert_eq!(commands(&body), vec!["lock_landscape"]);

    let (_, body) = app
        .post(
            &format!("{}/ticks", base),
            Some(&viewer),
            json!({ "is_loaded": true, "position_millis": 60000, "duration_millis": 60000, "did_just_finish": true }),
        )
        .await;
    assert_eq!(body["data"]["completed"], true);
    assert_eq!(body["data"]["play_state"], "paused");
    let (_, body) = app.get("/api/v1/progress", Some(&viewer)).await;
    assert_eq!(body["data"], json!([]));

    let (status, body) = app.delete(&base, Some(&viewer)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["phase"], "torn_down");
    assert!(commands(&body).contains(&"unload".to_string()));

    let (status, _) = app.get(&base, Some(&viewer)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn movie_session_autoplays_once_after_delay() {
    let app = spawn_app().await;
    let viewer = token_for("viewer-3", "v3@moviebox.app");
    app.subscribe("viewer-3").await;

    let (_, body) = app
        .post(
            "/api/v1/playback/sessions",
            Some(&viewer),
            json!({ "content_id": "1", "context": "movie", "platform": "web" }),
        )
        .await;
    let session = &body["data"]["session"];
    assert_eq!(session["autoplay_pending"], true);
    assert_eq!(session["commands"], json!([]));
    let base = format!(
        "/api/v1/playback/sessions/{}",
        session["session_id"].as_str().unwrap()
    );

    let (_, body) = app
        .post(&format!("{}/ticks", base), Some(&viewer), json!({ "is_loaded": true }))
        .await;
    assert_eq!(body["data"]["play_state"], "paused");
    assert!(commands(&body).is_empty());

    tokio::time::advance(Duration::from_millis(300)).await;

    let (_, body) = app.get(&base, Some(&viewer)).await;
    assert_eq!(body["data"]["play_state"], "playing");
    assert_eq!(body["data"]["autoplay_pending"], false);
    assert_eq!(commands(&body), vec!["play"]);

    let (_, body) = app
        .post(&format!("{}/toggle", base), Some(&viewer), json!({}))
        .await;
    assert_eq!(body["data"]["play_state"], "paused");
    assert_eq!(commands(&body), vec!["pause"]);

    // Web sessions never lock orientation.
    let (_, body) = app
        .post(&format!("{}/fullscreen", base), Some(&viewer), json!({}))
        .await;
    assert_eq!(body["data"]["fullscreen"], true);
    assert_eq!(body["data"]["orientation_locked"], false);
}

#[tokio::test]
async fn series_session_switches_episodes() {
    let app = spawn_app().await;
    let viewer = token_for("viewer-4", "v4@moviebox.app");
    app.subscribe("viewer-4").await;

    let (status, body) = app
        .post(
            "/api/v1/playback/sessions",
            Some(&viewer),
            json!({ "content_id": "s1", "context": "series" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let session = &body["data"]["session"];
    assert_eq!(session["content"]["id"], "s1e1");
    let base = format!(
        "/api/v1/playback/sessions/{}",
        session["session_id"].as_str().unwrap()
    );

    let (status, body) = app
        .post(&format!("{}/episode", base), Some(&viewer), json!({ "episode_id": "s1e2" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["content"]["id"], "s1e2");
    assert_eq!(body["data"]["phase"], "loading");

    let (status, _) = app
        .post(&format!("{}/episode", base), Some(&viewer), json!({ "episode_id": "nope" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Someone else's session is invisible.
    let intruder = token_for("viewer-5", "v5@moviebox.app");
    let (status, _) = app.get(&base, Some(&intruder)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn movie_session_cannot_switch_episode() {
    let app = spawn_app().await;
    let viewer = token_for("viewer-6", "v6@moviebox.app");
    app.subscribe("viewer-6").await;

    let (_, body) = app
        .post(
            "/api/v1/playback/sessions",
            Some(&viewer),
            json!({ "content_id": "1", "context": "movie" }),
        )
        .await;
    let id = body["data"]["session"]["session_id"].as_str().unwrap().to_string();

    let (status, _) = app
        .post(
            &format!("/api/v1/playback/sessions/{}/episode", id),
            Some(&viewer),
            json!({ "episode_id": "s1e2" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_content_is_not_found() {
    let app = spawn_app().await;
    let viewer = token_for("viewer-7", "v7@moviebox.app");
    app.subscribe("viewer-7").await;

    let (status, _) = app
        .post(
            "/api/v1/playback/sessions",
            Some(&viewer),
            json!({ "content_id": "missing", "context": "movie" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn load_error_fails_the_session() {
    let app = spawn_app().await;
    let viewer = token_for("viewer-8", "v8@moviebox.app");
    app.subscribe("viewer-8").await;

    let (_, body) = app
        .post(
            "/api/v1/playback/sessions",
            Some(&viewer),
            json!({ "content_id": "1", "context": "movie" }),
        )
        .await;
    let id = body["data"]["session"]["session_id"].as_str().unwrap().to_string();
    assert!(body["data"]["session"]["load_error"].is_null());

    let (status, body) = app
        .post(
            &format!("/api/v1/playback/sessions/{}/ticks", id),
            Some(&viewer),
            json!({ "is_loaded": false, "error": "HTTP 404" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["phase"], "failed");
    assert_eq!(body["data"]["load_error"], "Failed to load video.");
    assert_eq!(body["data"]["autoplay_pending"], false);
}

#[tokio::test(start_paused = true)]
async fn idle_sessions_are_swept() {
    let app = spawn_app().await;
    let viewer = token_for("viewer-9", "v9@moviebox.app");
    app.subscribe("viewer-9").await;

    let mut ids = Vec::new();
    for content_id in ["1", "2"] {
        let (_, body) = app
            .post(
                "/api/v1/playback/sessions",
                Some(&viewer),
                json!({ "content_id": content_id, "context": "movie" }),
            )
            .await;
        ids.push(body["data"]["session"]["session_id"].as_str().unwrap().to_string());
    }

    tokio::time::advance(Duration::from_secs(20 * 60)).await;
    let (status, _) = app
        .get(&format!("/api/v1/playback/sessions/{}", ids[1]), Some(&viewer))
        .await;
    assert_eq!(status, StatusCode::OK);
    tokio::time::advance(Duration::from_secs(15 * 60)).await;

    let (sessions, _) = moviebox::workers::janitor::sweep(&app.state).await;
    assert_eq!(sessions, 1);
    assert_eq!(app.state.sessions.len().await, 1);

    let (status, _) = app
        .get(&format!("/api/v1/playback/sessions/{}", ids[0]), Some(&viewer))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
