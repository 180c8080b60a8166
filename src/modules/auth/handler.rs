use super::dto::{AuthUser, MeResponse};
use super::service::AuthService;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
};

/// Current session view
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Signed-in user", body = ApiResponse<MeResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Auth"
)]
pub async fn get_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    let me = AuthService::me(state, &user).await;
    ApiSuccess(ApiResponse::success(me, "User profile retrieved"), StatusCode::OK).into_response()
}
