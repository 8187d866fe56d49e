//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use imagehub_auth::jwt::{JwtDecoder, JwtEncoder};
use imagehub_auth::password::{PasswordHasher, PasswordValidator};
use imagehub_core::config::AppConfig;
use imagehub_core::traits::{HealthProbe, StorageProvider};
use imagehub_database::repositories::{ImageRepository, UserRepository};
use imagehub_service::{ImageService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Database reachability probe
    pub database: Arc<dyn HealthProbe>,
    /// Image file storage
    pub storage: Arc<dyn StorageProvider>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Registration, login, profile
    pub user_service: Arc<UserService>,
    /// Image CRUD
    pub image_service: Arc<ImageService>,

    /// When the server started
    pub started_at: Instant,
}

impl AppState {
    /// Wires auth components and services on top of the given backends.
    pub fn new(
        config: AppConfig,
        database: Arc<dyn HealthProbe>,
        user_repo: Arc<dyn UserRepository>,
        image_repo: Arc<dyn ImageRepository>,
        storage: Arc<dyn StorageProvider>,
    ) -> Self {
        let password_hasher = Arc::new(PasswordHasher::new());
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let user_service = Arc::new(UserService::new(
            user_repo,
            password_hasher,
            password_validator,
            jwt_encoder,
        ));
        let image_service = Arc::new(ImageService::new(
            image_repo,
            Arc::clone(&storage),
            config.storage.clone(),
        ));

        Self {
            config: Arc::new(config),
            database,
            storage,
            jwt_decoder,
            user_service,
            image_service,
            started_at: Instant::now(),
        }
    }
}
