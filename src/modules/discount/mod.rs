use axum::Router;
use axum::routing::{delete, get, post};
use crate::state::AppState;
use axum::middleware;

pub mod dto;
pub mod generator;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router(state: AppState) -> axum::Router<AppState> {
    let user_routes = Router::new()
        .route("/discounts/validate", post(handler::validate_discount))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::auth_middleware
        ));

    let admin_routes = Router::new()
        .route("/admin/discounts", get(handler::list_discounts).post(handler::generate_discount))
        .route("/admin/discounts/{code}", delete(handler::delete_discount))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::role::admin_guard
        ))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware
        ));

    user_routes.merge(admin_routes)
}
