use axum::Router;
use axum::routing::{get, post, put};
use crate::state::AppState;
use axum::middleware;

pub mod dto;
pub mod handler;
pub mod media_url;
pub mod model;
pub mod repository;
pub mod seed;
pub mod service;

pub fn router(state: AppState) -> axum::Router<AppState> {
    let public_routes = Router::new()
        .route("/movies", get(handler::list_movies))
        .route("/movies/{id}", get(handler::get_movie))
        .route("/series", get(handler::list_series))
        .route("/series/{id}", get(handler::get_series))
        .route("/categories", get(handler::list_categories));

    let admin_routes = Router::new()
        .route("/admin/movies", post(handler::create_movie))
        .route("/admin/movies/{id}", put(handler::update_movie).delete(handler::delete_movie))

        .route("/admin/series", post(handler::create_series))
        .route("/admin/series/{id}", put(handler::update_series).delete(handler::delete_series))

        .route("/admin/series/{id}/seasons/{season}/episodes", post(handler::create_episode))
        .route(
            "/admin/series/{id}/seasons/{season}/episodes/{episode_id}",
            put(handler::update_episode).delete(handler::delete_episode),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::role::admin_guard
        ))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware
        ));

    public_routes.merge(admin_routes)
}
