//! Application builder: wires router, middleware and state into an Axum app.

use std::sync::Arc;

use axum::Router;
use tracing::info;

use imagehub_core::config::AppConfig;
use imagehub_core::error::AppError;
use imagehub_core::traits::{HealthProbe, StorageProvider};
use imagehub_database::DatabasePool;
use imagehub_database::repositories::{
    ImageRepository, PgImageRepository, PgUserRepository, UserRepository,
};
use imagehub_storage::LocalStorageProvider;

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(build_compression_layer())
        .layer(cors)
}

/// Runs the ImageHub server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, database: DatabasePool) -> Result<(), AppError> {
    info!("Starting ImageHub server...");

    let storage = LocalStorageProvider::new(&config.storage.root_path).await?;
    info!(root = %storage.root().display(), "Image storage ready");
    let storage: Arc<dyn StorageProvider> = Arc::new(storage);

    let user_repo: Arc<dyn UserRepository> =
        Arc::new(PgUserRepository::new(database.pool().clone()));
    let image_repo: Arc<dyn ImageRepository> =
        Arc::new(PgImageRepository::new(database.pool().clone()));
    let probe: Arc<dyn HealthProbe> = Arc::new(database.clone());

    let addr = config.server.bind_address();
    let state = AppState::new(config, probe, user_repo, image_repo, storage);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("ImageHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    database.close().await;
    info!("ImageHub server shut down gracefully");
    Ok(())
}

/// Resolves on Ctrl-C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
