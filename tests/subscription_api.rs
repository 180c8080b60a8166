mod common;

use axum::http::StatusCode;
use common::{admin_token, spawn_app, token_for};
use serde_json::json;
use time::Duration;

#[tokio::test]
async fn plans_are_public() {
    let app = spawn_app().await;
    let (status, body) = app.get("/api/v1/subscription/plans", None).await;
    assert_eq!(status, StatusCode::OK);

    let plans = body["data"].as_array().unwrap();
    assert_eq!(plans.len(), 2);
    assert_eq!(plans[0]["id"], "monthly");
    assert_eq!(plans[1]["price_display"], "KSh 4,999");
    assert_eq!(plans[1]["popular"], true);
}

#[tokio::test]
async fn discounted_checkout_activates_on_success_page() {
    let app = spawn_app().await;
    let admin = admin_token();
    let viewer = token_for("viewer-1", "viewer@moviebox.app");

    let (status, body) = app
        .post("/api/v1/admin/discounts", Some(&admin), json!({ "discount_percentage": 20 }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let code = body["data"]["code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 6);

    let (status, body) = app
        .post(
            "/api/v1/subscription/checkout",
            Some(&viewer),
            json!({
                "plan": "monthly",
                "platform": "paypal",
                "discount_code": code.to_lowercase()
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["discount"], 20);
    let final_price = body["data"]["final_price"].as_f64().unwrap();
    assert!((final_price - 399.2).abs() < 0.01);
    let checkout_url = body["data"]["checkout_url"].as_str().unwrap();
    assert!(checkout_url.contains("client-id=test-client"));
    let checkout_id = body["data"]["checkout_id"].as_str().unwrap().to_string();

    // Still unused while the web view is open.
    let (_, body) = app
        .post("/api/v1/discounts/validate", Some(&viewer), json!({ "code": code }))
        .await;
    assert_eq!(body["data"]["is_valid"], true);

    let navigation = format!("/api/v1/subscription/checkout/{}/navigation", checkout_id);
    let (status, body) = app
        .post(
            &navigation,
            Some(&viewer),
            json!({ "url": "https://www.paypal.com/checkoutnow?token=EC-1" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["outcome"], "pending");
    assert!(body["data"]["subscription"].is_null());

    let (status, body) = app
        .post(
            &navigation,
            Some(&viewer),
            json!({ "url": "https://moviebox.app/payment-success?subscription_id=I-ABC" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["outcome"], "success");
    assert_eq!(body["data"]["transaction_id"], "I-ABC");
    assert_eq!(body["data"]["subscription"]["status"], "active");
    assert_eq!(body["data"]["subscription"]["expiry_date"], "2025-03-31T12:00:00Z");

    let (_, body) = app.get("/api/v1/subscription", Some(&viewer)).await;
    assert_eq!(body["data"]["is_active"], true);

    let (_, body) = app
        .post("/api/v1/discounts/validate", Some(&viewer), json!({ "code": code }))
        .await;
    assert_eq!(body["data"]["is_valid"], false);
    assert_eq!(body["data"]["message"], "This discount code has already been used");

    // The checkout is spent.
    let (status, _) = app
        .post(
            &navigation,
            Some(&viewer),
            json!({ "url": "https://moviebox.app/payment-success?subscription_id=I-ABC" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cancelled_checkout_grants_nothing() {
    let app = spawn_app().await;
    let viewer = token_for("viewer-2", "v2@moviebox.app");

    let (_, body) = app
        .post(
            "/api/v1/subscription/checkout",
            Some(&viewer),
            json!({ "plan": "yearly", "platform": "mpesa" }),
        )
        .await;
    let checkout_id = body["data"]["checkout_id"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            &format!("/api/v1/subscription/checkout/{}/navigation", checkout_id),
            Some(&viewer),
            json!({ "url": "https://moviebox.app/payment-cancel?subscription_id=I-XYZ" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["outcome"], "cancelled");

    let (_, body) = app.get("/api/v1/subscription", Some(&viewer)).await;
    assert_eq!(body["data"]["is_active"], false);
}

#[tokio::test]
async fn checkout_belongs_to_its_user() {
    let app = spawn_app().await;
    let owner = token_for("owner", "owner@moviebox.app");
    let other = token_for("other", "other@moviebox.app");

    let (_, body) = app
        .post(
            "/api/v1/subscription/checkout",
            Some(&owner),
            json!({ "plan": "monthly", "platform": "paypal" }),
        )
        .await;
    let checkout_id = body["data"]["checkout_id"].as_str().unwrap().to_string();

    let (status, _) = app
        .post(
            &format!("/api/v1/subscription/checkout/{}/navigation", checkout_id),
            Some(&other),
            json!({ "url": "https://moviebox.app/payment-success?ba_token=BA-1" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_discount_blocks_checkout() {
    let app = spawn_app().await;
    let viewer = token_for("viewer-3", "v3@moviebox.app");

    let (status, body) = app
        .post(
            "/api/v1/subscription/checkout",
            Some(&viewer),
            json!({ "plan": "monthly", "platform": "paypal", "discount_code": "ZZZZZZ" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid discount code");
}

#[tokio::test]
async fn subscription_lapses_after_expiry() {
    let app = spawn_app().await;
    let viewer = token_for("viewer-4", "v4@moviebox.app");
    app.subscribe("viewer-4").await;

    let (_, body) = app.get("/api/v1/subscription", Some(&viewer)).await;
    assert_eq!(body["data"]["is_active"], true);

    app.clock.advance(Duration::days(31));
    let (_, body) = app.get("/api/v1/subscription", Some(&viewer)).await;
    assert_eq!(body["data"]["is_active"], false);
    assert_eq!(body["data"]["record"]["status"], "expired");
}
