pub mod auth;
pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::listing::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Listing API, behind the optional access gate
    let api = Router::new()
        .route("/api/v1/taxonomy", get(handlers::handle_taxonomy))
        .route("/api/v1/listings/preview", post(handlers::handle_preview))
        .route("/api/v1/listings/generate", post(handlers::handle_generate))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_app_password,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .merge(api)
        .with_state(state)
}
