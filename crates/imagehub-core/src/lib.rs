//! # imagehub-core
//!
//! Core crate for ImageHub. Contains the configuration schema, the storage
//! provider trait, pagination types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other ImageHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
