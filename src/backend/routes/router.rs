/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route tables into a single Axum router and wraps it in the
 * tower-http layers.
 *
 * # Layers
 *
 * - `TraceLayer` opens a span per request
 * - `CorsLayer` allows any origin, method and header
 */
use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::backend::routes::api_routes::{
    configure_auth_routes, configure_category_routes, configure_edge_routes,
    configure_recipe_routes, configure_user_routes,
};
use crate::backend::server::state::AppState;
use crate::shared::Envelope;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Store handle and auth settings shared by every handler
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new().route("/health", get(health));
    let router = configure_auth_routes(router);
    let router = configure_user_routes(router);
    let router = configure_edge_routes(router);
    let router = configure_category_routes(router);
    let router = configure_recipe_routes(router);

    router
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(app_state)
}

async fn health() -> impl IntoResponse {
    Json(Envelope::ok())
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(Envelope::fail("The requested route does not exist", None)),
    )
}
