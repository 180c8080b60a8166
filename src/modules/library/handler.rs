use super::dto::{LikeResponse, MyListResponse};
use super::model::WatchProgress;
use super::service::LibraryService;
use crate::common::response::{ApiError, ApiResponse, ApiSuccess};
use crate::modules::auth::dto::AuthUser;
use crate::state::AppState;
use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

#[utoipa::path(
    post,
    path = "/api/v1/likes/{video_id}",
    params(
        ("video_id" = String, Path, description = "Movie or episode ID")
    ),
    responses(
        (status = 200, description = "Like toggled", body = ApiResponse<LikeResponse>),
        (status = 404, description = "Video Not Found")
    ),
    tag = "Library",
    security(("bearer_auth" = []))
)]
pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(video_id): Path<String>,
) -> impl IntoResponse {
    match LibraryService::toggle_like(state, &user, &video_id).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Like updated"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/likes/{video_id}",
    params(
        ("video_id" = String, Path, description = "Movie or episode ID")
    ),
    responses(
        (status = 200, description = "Like state", body = ApiResponse<LikeResponse>)
    ),
    tag = "Library",
    security(("bearer_auth" = []))
)]
pub async fn is_liked(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(video_id): Path<String>,
) -> impl IntoResponse {
    let res = LibraryService::is_liked(state, &user, &video_id).await;
    ApiSuccess(ApiResponse::success(res, "Like state retrieved"), StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/api/v1/my-list",
    responses(
        (status = 200, description = "Continue watching and liked videos", body = ApiResponse<MyListResponse>)
    ),
    tag = "Library",
    security(("bearer_auth" = []))
)]
pub async fn my_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    let res = LibraryService::my_list(state, &user).await;
    ApiSuccess(ApiResponse::success(res, "My list retrieved successfully"), StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/api/v1/progress",
    responses(
        (status = 200, description = "Raw watch-progress records", body = ApiResponse<Vec<WatchProgress>>)
    ),
    tag = "Library",
    security(("bearer_auth" = []))
)]
pub async fn list_progress(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    let res = LibraryService::progress(state, &user).await;
    ApiSuccess(ApiResponse::success(res, "Watch progress retrieved successfully"), StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/v1/landing/seen",
    responses(
        (status = 200, description = "Landing marked as seen", body = ApiResponse<String>)
    ),
    tag = "Library",
    security(("bearer_auth" = []))
)]
pub async fn mark_landing_seen(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    LibraryService::mark_landing_seen(state, &user).await;
    ApiSuccess(ApiResponse::success("seen".to_string(), "Landing marked as seen"), StatusCode::OK)
}
