//! JWT access token creation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use imagehub_core::config::AuthConfig;
use imagehub_core::error::AppError;

use super::claims::Claims;

/// A freshly signed access token.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AccessToken {
    /// The encoded JWT.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// The token's `jti`.
    pub jti: Uuid,
}

/// Creates HS256-signed access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    access_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let minutes = i64::try_from(config.jwt_access_ttl_minutes).unwrap_or(i64::MAX / 60_000);
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: Duration::minutes(minutes.max(1)),
        }
    }

    /// Issues an access token for the given user.
    pub fn generate_access_token(&self, user_id: Uuid, email: &str) -> Result<AccessToken, AppError> {
        self.generate_at(user_id, email, Utc::now())
    }

    fn generate_at(
        &self,
        user_id: Uuid,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessToken, AppError> {
        let expires_at = now + self.access_ttl;
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(AccessToken {
            token,
            expires_at,
            jti: claims.jti,
        })
    }
}
