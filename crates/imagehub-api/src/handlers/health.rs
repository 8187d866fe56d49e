//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, ComponentHealth, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    }))
}

/// GET /api/health/detailed
pub async fn health_detailed(
    State(state): State<AppState>,
) -> Json<ApiResponse<DetailedHealthResponse>> {
    let database_up = state.database.health_check().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Database health check failed");
        false
    });
    let storage_up = state.storage.health_check().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Storage health check failed");
        false
    });

    Json(ApiResponse::ok(DetailedHealthResponse {
        status: if database_up && storage_up { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        database: component(state.database.component(), database_up),
        storage: component(state.storage.provider_type(), storage_up),
    }))
}

fn component(name: &str, up: bool) -> ComponentHealth {
    ComponentHealth {
        component: name.to_string(),
        status: if up { "up" } else { "down" }.to_string(),
    }
}
