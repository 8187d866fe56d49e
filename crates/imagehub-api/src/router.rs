//! Route definitions for the ImageHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Room for multipart boundaries and text fields on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = (state.config.storage.max_upload_size_bytes as usize)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(image_routes())
        .merge(health_routes())
        .merge(docs_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Auth endpoints: register, login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Image CRUD and file download
fn image_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/images",
            get(handlers::image::list_images).post(handlers::image::upload_image),
        )
        .route(
            "/images/{id}",
            get(handlers::image::get_image)
                .put(handlers::image::update_image)
                .delete(handlers::image::delete_image),
        )
        .route("/images/{id}/file", get(handlers::image::get_image_file))
}

/// Health checks
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Swagger UI and the OpenAPI document
fn docs_routes() -> Router<AppState> {
    Router::new()
        .route("/docs", get(handlers::docs::swagger_ui))
        .route("/docs/openapi.json", get(handlers::docs::openapi_json))
}
