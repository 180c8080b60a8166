//! Shared harness for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use moviebox::common::clock::FixedClock;
use moviebox::config::settings::{AppConfig, PaymentConfig};
use moviebox::infrastructure::storage::MemoryStore;
use moviebox::modules::auth::dto::TokenClaims;
use moviebox::state::AppState;
use serde_json::Value;
use time::macros::datetime;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret";
pub const ADMIN_EMAIL: &str = "admin@moviebox.app";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub clock: Arc<FixedClock>,
    pub store: Arc<MemoryStore>,
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server_port: 0,
        redis_url: None,
        auth_jwt_secret: JWT_SECRET.to_string(),
        admin_email: ADMIN_EMAIL.to_string(),
        payments: PaymentConfig {
            paypal_client_id: "test-client".to_string(),
            ..PaymentConfig::default()
        },
    }
}

pub async fn spawn_app() -> TestApp {
    let clock = Arc::new(FixedClock::new(datetime!(2025-03-01 12:00 UTC)));
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(test_config(), store.clone(), clock.clone()).await;
    let router = moviebox::app::create_app(state.clone()).await;

    TestApp {
        router,
        state,
        clock,
        store,
    }
}

/// Access token as the auth provider would issue it.
pub fn token_for(user_id: &str, email: &str) -> String {
    let claims = TokenClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: jsonwebtoken::get_current_timestamp() as usize + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn admin_token() -> String {
    token_for("admin-1", ADMIN_EMAIL)
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Activates a monthly plan for `user_id` directly on the repository.
    pub async fn subscribe(&self, user_id: &str) {
        use moviebox::modules::subscription::model::{PaymentPlatform, PlanId};
        self.state
            .subscriptions
            .activate(user_id, PlanId::Monthly, PaymentPlatform::Paypal, "I-TEST".to_string())
            .await;
    }
}
