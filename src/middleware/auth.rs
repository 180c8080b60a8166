use crate::modules::auth::dto::{AuthUser, TokenClaims};
use crate::state::AppState;
use crate::common::response::ApiError;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|auth_header| auth_header.to_str().ok())
        .and_then(|auth_value| auth_value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn verify(state: &AppState, token: &str) -> Result<AuthUser, ApiError> {
    let secret = &state.config.auth_jwt_secret;

    // Provider tokens carry an audience we don't pin.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    let claims = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "Rejected access token");
        ApiError("Unauthorized: Invalid token signature".to_string(), StatusCode::UNAUTHORIZED)
    })?
    .claims;

    Ok(AuthUser::from(claims))
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| ApiError("Unauthorized: Missing or invalid token".to_string(), StatusCode::UNAUTHORIZED))?;

    let user = verify(&state, token)?;
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Like [`auth_middleware`] but lets anonymous requests through. A token
/// that is present but invalid is still rejected.
pub async fn optional_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(token) = bearer_token(req.headers()) {
        let user = verify(&state, token)?;
        req.extensions_mut().insert(user);
    }

    Ok(next.run(req).await)
}
