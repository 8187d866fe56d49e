//! User account operations.

use std::sync::Arc;

use tracing::{info, warn};

use imagehub_auth::jwt::{AccessToken, JwtEncoder};
use imagehub_auth::password::{PasswordHasher, PasswordValidator};
use imagehub_core::error::AppError;
use imagehub_database::repositories::UserRepository;
use imagehub_entity::user::{CreateUser, User, normalize_email};

use crate::context::RequestContext;

/// Maximum display name length, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Input for account registration.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    /// Email address (normalized before storage).
    pub email: String,
    /// Display name.
    pub name: String,
    /// Plaintext password.
    pub password: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The signed access token.
    pub token: AccessToken,
    /// The authenticated user.
    pub user: User,
}

/// Handles account registration, login, and profile lookup.
#[derive(Debug, Clone)]
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            encoder,
        }
    }

    /// Registers a new account.
    ///
    /// An email that is already registered is a validation error.
    pub async fn register(&self, params: RegisterParams) -> Result<User, AppError> {
        let email = normalize_email(&params.email);
        let name = params.name.trim().to_string();

        if email.is_empty() {
            return Err(AppError::validation("Email is required"));
        }
        if name.is_empty() || name.chars().count() > MAX_NAME_LENGTH {
            return Err(AppError::validation(format!(
                "Name must be between 1 and {MAX_NAME_LENGTH} characters"
            )));
        }
        self.validator.validate(&params.password)?;

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::validation("Email is already registered"));
        }

        let password_hash = self.hasher.hash_password(&params.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                email,
                name,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Verifies credentials and issues an access token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let email = normalize_email(email);

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            warn!("Login attempt for unknown email");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let token = self.encoder.generate_access_token(user.id, &user.email)?;
        info!(user_id = %user.id, expires_at = %token.expires_at, "User logged in");

        Ok(LoginResult { token, user })
    }

    /// Loads the authenticated user's profile.
    ///
    /// A valid token whose user no longer exists is treated as unauthenticated.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("User no longer exists"))
    }
}
