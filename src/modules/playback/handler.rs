use super::dto::{OpenSessionRequest, OpenSessionResponse, SessionView, SwitchEpisodeRequest};
use super::model::PlaybackTick;
use super::service::PlaybackService;
use crate::common::response::{ApiError, ApiResponse, ApiSuccess};
use crate::modules::auth::dto::AuthUser;
use crate::modules::subscription::gate::GateDecision;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

/// Open a watch-session. Signed-out callers get a sign-in redirect and
/// callers without a subscription get the plans redirect.
#[utoipa::path(
    post,
    path = "/api/v1/playback/sessions",
    request_body = OpenSessionRequest,
    responses(
        (status = 201, description = "Session opened", body = ApiResponse<OpenSessionResponse>),
        (status = 401, description = "Sign in required", body = ApiResponse<OpenSessionResponse>),
        (status = 402, description = "Subscription required", body = ApiResponse<OpenSessionResponse>),
        (status = 404, description = "Video Not Found")
    ),
    tag = "Playback",
    security((), ("bearer_auth" = []))
)]
pub async fn open_session(
    State(state): State<AppState>,
    user: Option<Extension<AuthUser>>,
    Json(req): Json<OpenSessionRequest>,
) -> impl IntoResponse {
    let user = user.map(|Extension(u)| u);
    match PlaybackService::open(state, user, req).await {
        Ok(res) => match res.decision {
            GateDecision::Allow => ApiSuccess(ApiResponse::success(res, "Watch session opened"), StatusCode::CREATED).into_response(),
            GateDecision::SignIn => ApiSuccess(ApiResponse::rejected(res, GateDecision::SignIn.message()), StatusCode::UNAUTHORIZED).into_response(),
            GateDecision::Subscribe => ApiSuccess(ApiResponse::rejected(res, GateDecision::Subscribe.message()), StatusCode::PAYMENT_REQUIRED).into_response(),
        },
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/playback/sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session state", body = ApiResponse<SessionView>),
        (status = 404, description = "Session Not Found")
    ),
    tag = "Playback",
    security(("bearer_auth" = []))
)]
pub async fn get_session(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match PlaybackService::get(state, &user, id).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Session retrieved"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/playback/sessions/{id}/ticks",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body = PlaybackTick,
    responses(
        (status = 200, description = "Tick applied", body = ApiResponse<SessionView>),
        (status = 404, description = "Session Not Found")
    ),
    tag = "Playback",
    security(("bearer_auth" = []))
)]
pub async fn post_tick(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(tick): Json<PlaybackTick>,
) -> impl IntoResponse {
    match PlaybackService::tick(state, &user, id, tick).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Tick applied"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/playback/sessions/{id}/toggle",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Play/pause toggled when the player allows it", body = ApiResponse<SessionView>),
        (status = 404, description = "Session Not Found")
    ),
    tag = "Playback",
    security(("bearer_auth" = []))
)]
pub async fn toggle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match PlaybackService::toggle(state, &user, id).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Playback toggled"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/playback/sessions/{id}/fullscreen",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Fullscreen entered", body = ApiResponse<SessionView>),
        (status = 404, description = "Session Not Found")
    ),
    tag = "Playback",
    security(("bearer_auth" = []))
)]
pub async fn enter_fullscreen(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match PlaybackService::enter_fullscreen(state, &user, id).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Fullscreen entered"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/playback/sessions/{id}/fullscreen",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Fullscreen exited", body = ApiResponse<SessionView>),
        (status = 404, description = "Session Not Found")
    ),
    tag = "Playback",
    security(("bearer_auth" = []))
)]
pub async fn exit_fullscreen(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match PlaybackService::exit_fullscreen(state, &user, id).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Fullscreen exited"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/playback/sessions/{id}/episode",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body = SwitchEpisodeRequest,
    responses(
        (status = 200, description = "Episode switched", body = ApiResponse<SessionView>),
        (status = 400, description = "Session is not a series session"),
        (status = 404, description = "Session or Episode Not Found")
    ),
    tag = "Playback",
    security(("bearer_auth" = []))
)]
pub async fn switch_episode(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<SwitchEpisodeRequest>,
) -> impl IntoResponse {
    match PlaybackService::switch_episode(state, &user, id, req).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Episode switched"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/playback/sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session closed", body = ApiResponse<SessionView>),
        (status = 404, description = "Session Not Found")
    ),
    tag = "Playback",
    security(("bearer_auth" = []))
)]
pub async fn close_session(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match PlaybackService::close(state, &user, id).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Session closed"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
