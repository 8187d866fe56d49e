//! Password policy for new passwords.

use imagehub_core::config::AuthConfig;
use imagehub_core::error::AppError;

/// Upper bound on password length, in characters.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Validates passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length.clamp(1, MAX_PASSWORD_LENGTH),
        }
    }

    /// Minimum accepted length.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Returns an error describing the first violated rule.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let length = password.chars().count();
        if length < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if length > MAX_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at most {MAX_PASSWORD_LENGTH} characters long"
            )));
        }

        if !password.chars().any(char::is_alphabetic) {
            return Err(AppError::validation(
                "Password must contain at least one letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "Password must contain at least one digit",
            ));
        }

        Ok(())
    }
}
