use crate::common::response::{ApiError, ApiResponse, ApiSuccess};
use crate::modules::content::dto::*;
use crate::modules::content::model::{CATEGORIES, Episode};
use crate::modules::content::service::ContentService;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

// --- MOVIE HANDLERS ---

#[utoipa::path(
    get,
    path = "/api/v1/movies",
    params(MovieFilter),
    responses(
        (status = 200, description = "List Movies", body = ApiResponse<Vec<MovieResponse>>)
    ),
    tag = "Content"
)]
pub async fn list_movies(
    State(state): State<AppState>,
    Query(filter): Query<MovieFilter>,
) -> impl IntoResponse {
    let res = ContentService::list_movies(state, filter).await;
    ApiSuccess(ApiResponse::success(res, "Movies retrieved successfully"), StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/api/v1/movies/{id}",
    params(
        ("id" = String, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Get Movie", body = ApiResponse<MovieResponse>),
        (status = 404, description = "Movie Not Found")
    ),
    tag = "Content"
)]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match ContentService::get_movie(state, &id).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Movie retrieved successfully"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Browse categories", body = ApiResponse<Vec<String>>)
    ),
    tag = "Content"
)]
pub async fn list_categories() -> impl IntoResponse {
    let categories: Vec<String> = CATEGORIES.iter().map(|c| c.to_string()).collect();
    ApiSuccess(ApiResponse::success(categories, "Categories retrieved successfully"), StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/movies",
    request_body = CreateMovieRequest,
    responses(
        (status = 201, description = "Movie Created", body = ApiResponse<MovieResponse>),
        (status = 400, description = "Bad Request"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn create_movie(
    State(state): State<AppState>,
    Json(req): Json<CreateMovieRequest>,
) -> impl IntoResponse {
    match ContentService::create_movie(state, req).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Movie created successfully"), StatusCode::CREATED).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/movies/{id}",
    params(
        ("id" = String, Path, description = "Movie ID")
    ),
    request_body = UpdateMovieRequest,
    responses(
        (status = 200, description = "Movie Updated", body = ApiResponse<MovieResponse>),
        (status = 404, description = "Movie Not Found"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateMovieRequest>,
) -> impl IntoResponse {
    match ContentService::update_movie(state, &id, req).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Movie updated successfully"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/movies/{id}",
    params(
        ("id" = String, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie Deleted"),
        (status = 404, description = "Movie Not Found"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match ContentService::delete_movie(state, &id).await {
        Ok(_) => ApiSuccess(ApiResponse::success((), "Movie deleted successfully"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

// --- SERIES HANDLERS ---

#[utoipa::path(
    get,
    path = "/api/v1/series",
    responses(
        (status = 200, description = "List Series", body = ApiResponse<Vec<SeriesListResponse>>)
    ),
    tag = "Content"
)]
pub async fn list_series(State(state): State<AppState>) -> impl IntoResponse {
    let res = ContentService::list_series(state).await;
    ApiSuccess(ApiResponse::success(res, "Series retrieved successfully"), StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/api/v1/series/{id}",
    params(
        ("id" = String, Path, description = "Series ID")
    ),
    responses(
        (status = 200, description = "Get Series", body = ApiResponse<SeriesResponse>),
        (status = 404, description = "Series Not Found")
    ),
    tag = "Content"
)]
pub async fn get_series(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match ContentService::get_series(state, &id).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Series retrieved successfully"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/series",
    request_body = CreateSeriesRequest,
    responses(
        (status = 201, description = "Series Created", body = ApiResponse<SeriesResponse>),
        (status = 400, description = "Bad Request"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn create_series(
    State(state): State<AppState>,
    Json(req): Json<CreateSeriesRequest>,
) -> impl IntoResponse {
    match ContentService::create_series(state, req).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Series created successfully"), StatusCode::CREATED).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/series/{id}",
    params(
        ("id" = String, Path, description = "Series ID")
    ),
    request_body = UpdateSeriesRequest,
    responses(
        (status = 200, description = "Series Updated", body = ApiResponse<SeriesResponse>),
        (status = 404, description = "Series Not Found"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn update_series(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateSeriesRequest>,
) -> impl IntoResponse {
    match ContentService::update_series(state, &id, req).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Series updated successfully"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/series/{id}",
    params(
        ("id" = String, Path, description = "Series ID")
    ),
    responses(
        (status = 200, description = "Series Deleted"),
        (status = 404, description = "Series Not Found"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn delete_series(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match ContentService::delete_series(state, &id).await {
        Ok(_) => ApiSuccess(ApiResponse::success((), "Series deleted successfully"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

// --- EPISODE HANDLERS ---

#[utoipa::path(
    post,
    path = "/api/v1/admin/series/{id}/seasons/{season}/episodes",
    params(
        ("id" = String, Path, description = "Series ID"),
        ("season" = u32, Path, description = "Season number, created when missing")
    ),
    request_body = EpisodeInput,
    responses(
        (status = 201, description = "Episode Created", body = ApiResponse<Episode>),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Series Not Found")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn create_episode(
    State(state): State<AppState>,
    Path((id, season)): Path<(String, u32)>,
    Json(req): Json<EpisodeInput>,
) -> impl IntoResponse {
    match ContentService::add_episode(state, &id, season, req).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Episode created successfully"), StatusCode::CREATED).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/series/{id}/seasons/{season}/episodes/{episode_id}",
    params(
        ("id" = String, Path, description = "Series ID"),
        ("season" = u32, Path, description = "Season number"),
        ("episode_id" = String, Path, description = "Episode ID")
    ),
    request_body = UpdateEpisodeRequest,
    responses(
        (status = 200, description = "Episode Updated", body = ApiResponse<Episode>),
        (status = 404, description = "Episode Not Found")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn update_episode(
    State(state): State<AppState>,
    Path((id, season, episode_id)): Path<(String, u32, String)>,
    Json(req): Json<UpdateEpisodeRequest>,
) -> impl IntoResponse {
    match ContentService::update_episode(state, &id, season, &episode_id, req).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Episode updated successfully"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/series/{id}/seasons/{season}/episodes/{episode_id}",
    params(
        ("id" = String, Path, description = "Series ID"),
        ("season" = u32, Path, description = "Season number"),
        ("episode_id" = String, Path, description = "Episode ID")
    ),
    responses(
        (status = 200, description = "Episode Deleted"),
        (status = 404, description = "Episode Not Found")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn delete_episode(
    State(state): State<AppState>,
    Path((id, season, episode_id)): Path<(String, u32, String)>,
) -> impl IntoResponse {
    match ContentService::delete_episode(state, &id, season, &episode_id).await {
        Ok(_) => ApiSuccess(ApiResponse::success((), "Episode deleted successfully"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
