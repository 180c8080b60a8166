use super::dto::{GenerateDiscountRequest, ValidateDiscountRequest};
use super::model::{DiscountCode, DiscountValidation};
use super::service::DiscountService;
use crate::common::response::{ApiError, ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

#[utoipa::path(
    get,
    path = "/api/v1/admin/discounts",
    responses(
        (status = 200, description = "List discount codes, newest first", body = ApiResponse<Vec<DiscountCode>>),
        (status = 403, description = "Forbidden")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn list_discounts(State(state): State<AppState>) -> impl IntoResponse {
    let codes = DiscountService::list(state).await;
    ApiSuccess(ApiResponse::success(codes, "Discount codes retrieved successfully"), StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/discounts",
    request_body = GenerateDiscountRequest,
    responses(
        (status = 201, description = "Discount code generated", body = ApiResponse<DiscountCode>),
        (status = 400, description = "Bad Request"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn generate_discount(
    State(state): State<AppState>,
    Json(req): Json<GenerateDiscountRequest>,
) -> impl IntoResponse {
    match DiscountService::generate(state, req).await {
        Ok(code) => ApiSuccess(ApiResponse::success(code, "Discount code generated successfully"), StatusCode::CREATED).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/discounts/{code}",
    params(
        ("code" = String, Path, description = "Discount code")
    ),
    responses(
        (status = 200, description = "Discount code deleted"),
        (status = 404, description = "Discount code not found")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn delete_discount(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> impl IntoResponse {
    match DiscountService::delete(state, &code).await {
        Ok(_) => ApiSuccess(ApiResponse::success((), "Discount code deleted successfully"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Check a code before checkout. Never consumes it.
#[utoipa::path(
    post,
    path = "/api/v1/discounts/validate",
    request_body = ValidateDiscountRequest,
    responses(
        (status = 200, description = "Validation result", body = ApiResponse<DiscountValidation>),
        (status = 400, description = "Missing code"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Subscription",
    security(("bearer_auth" = []))
)]
pub async fn validate_discount(
    State(state): State<AppState>,
    Json(req): Json<ValidateDiscountRequest>,
) -> impl IntoResponse {
    match DiscountService::validate(state, req).await {
        Ok(result) => ApiSuccess(ApiResponse::success(result, "Discount code checked"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
