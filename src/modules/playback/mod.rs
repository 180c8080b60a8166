use axum::Router;
use axum::routing::{get, post};
use crate::state::AppState;
use axum::middleware;

pub mod device;
pub mod dto;
pub mod handler;
pub mod model;
pub mod progress;
pub mod registry;
pub mod service;
pub mod session;

pub fn router(state: AppState) -> axum::Router<AppState> {
    let gate_routes = Router::new()
        .route("/playback/sessions", post(handler::open_session))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::optional_auth
        ));

    let session_routes = Router::new()
        .route("/playback/sessions/{id}", get(handler::get_session).delete(handler::close_session))
        .route("/playback/sessions/{id}/ticks", post(handler::post_tick))
        .route("/playback/sessions/{id}/toggle", post(handler::toggle))
        .route(
            "/playback/sessions/{id}/fullscreen",
            post(handler::enter_fullscreen).delete(handler::exit_fullscreen),
        )
        .route("/playback/sessions/{id}/episode", post(handler::switch_episode))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware
        ));

    gate_routes.merge(session_routes)
}
