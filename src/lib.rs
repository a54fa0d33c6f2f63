//! In-memory URL shortener: issues short codes, redirects them and counts clicks.

pub mod error;
pub mod model;
pub mod routes;
pub mod settings;
pub mod store;
pub mod utils;

use axum::middleware::map_response;
use axum::routing::{get, post};
use axum::Router;
use routes::{
    api_health, get_statistics, health, method_not_allowed, not_found, redirect, shorten_url,
    timeout_as_json, AppState,
};
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let request_timeout = state.settings.request_timeout;
    let router = Router::new()
        .route("/", get(health).fallback(method_not_allowed))
        .route("/api/health", get(api_health).fallback(method_not_allowed))
        .route("/api/shorten", post(shorten_url).fallback(method_not_allowed))
        .route(
            "/api/stats/:short_code",
            get(get_statistics).fallback(method_not_allowed),
        )
        .route("/:short_code", get(redirect).fallback(method_not_allowed))
        .fallback(not_found);
    with_request_timeout(router, request_timeout)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// The timeout layer answers with an empty 408, which is rewritten into the JSON error body.
fn with_request_timeout<S>(router: Router<S>, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(TimeoutLayer::new(timeout))
        .layer(map_response(timeout_as_json))
}
