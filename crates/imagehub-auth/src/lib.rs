//! # imagehub-auth
//!
//! Credential handling for ImageHub.
//!
//! ## Modules
//!
//! - `jwt`: HS256 access token creation and validation
//! - `password`: Argon2id password hashing and policy enforcement

pub mod jwt;
pub mod password;

pub use jwt::{AccessToken, Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
