use axum::Router;
use axum::routing::{get, post};
use crate::state::AppState;
use axum::middleware;

pub mod checkout;
pub mod dto;
pub mod gate;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router(state: AppState) -> axum::Router<AppState> {
    let public_routes = Router::new()
        .route("/subscription/plans", get(handler::list_plans));

    let protected_routes = Router::new()
        .route("/subscription", get(handler::get_subscription))
        .route("/subscription/checkout", post(handler::start_checkout))
        .route("/subscription/checkout/{id}/navigation", post(handler::report_navigation))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware
        ));

    public_routes.merge(protected_routes)
}
