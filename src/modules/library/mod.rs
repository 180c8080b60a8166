use axum::Router;
use axum::routing::{get, post};
use crate::state::AppState;
use axum::middleware;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router(state: AppState) -> axum::Router<AppState> {
    Router::new()
        .route("/likes/{video_id}", get(handler::is_liked).post(handler::toggle_like))
        .route("/my-list", get(handler::my_list))
        .route("/progress", get(handler::list_progress))
        .route("/landing/seen", post(handler::mark_landing_seen))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware
        ))
}
