//! # imagehub-api
//!
//! HTTP API layer for ImageHub built on Axum.
//!
//! Provides the REST endpoints, middleware (CORS, logging, compression,
//! body limits, timeouts), extractors, DTOs, error mapping, and the
//! OpenAPI document with its Swagger UI page.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
