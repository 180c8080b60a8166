use super::dto::*;
use super::service::SubscriptionService;
use crate::common::response::{ApiError, ApiResponse, ApiSuccess};
use crate::modules::auth::dto::AuthUser;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/v1/subscription/plans",
    responses(
        (status = 200, description = "Available plans", body = ApiResponse<Vec<PlanResponse>>)
    ),
    tag = "Subscription"
)]
pub async fn list_plans() -> impl IntoResponse {
    ApiSuccess(ApiResponse::success(SubscriptionService::plans(), "Plans retrieved successfully"), StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/api/v1/subscription",
    responses(
        (status = 200, description = "Current subscription", body = ApiResponse<SubscriptionStatusResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Subscription",
    security(("bearer_auth" = []))
)]
pub async fn get_subscription(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    let res = SubscriptionService::status(state, &user).await;
    ApiSuccess(ApiResponse::success(res, "Subscription retrieved successfully"), StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/v1/subscription/checkout",
    request_body = StartCheckoutRequest,
    responses(
        (status = 201, description = "Checkout started", body = ApiResponse<CheckoutResponse>),
        (status = 400, description = "Invalid or used discount code"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Subscription",
    security(("bearer_auth" = []))
)]
pub async fn start_checkout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<StartCheckoutRequest>,
) -> impl IntoResponse {
    match SubscriptionService::start_checkout(state, &user, req).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Checkout started"), StatusCode::CREATED).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/subscription/checkout/{id}/navigation",
    params(
        ("id" = Uuid, Path, description = "Checkout ID")
    ),
    request_body = NavigationRequest,
    responses(
        (status = 200, description = "Navigation classified", body = ApiResponse<NavigationResponse>),
        (status = 404, description = "Checkout Not Found")
    ),
    tag = "Subscription",
    security(("bearer_auth" = []))
)]
pub async fn report_navigation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<NavigationRequest>,
) -> impl IntoResponse {
    match SubscriptionService::report_navigation(state, &user, id, req).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Navigation processed"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
