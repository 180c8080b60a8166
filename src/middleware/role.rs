use crate::modules::auth::dto::AuthUser;
use crate::common::response::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Extension, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

/// Admits only the configured admin account. Runs after `auth_middleware`.
pub async fn admin_guard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !user.is_admin(&state.config.admin_email) {
        tracing::warn!(user_id = %user.id, "Admin route refused");
        return Err(ApiError("Forbidden: Admin access required".to_string(), StatusCode::FORBIDDEN));
    }

    Ok(next.run(req).await)
}
