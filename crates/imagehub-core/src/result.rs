//! Convenience result type alias for ImageHub.

use crate::error::AppError;

/// A specialized `Result` type for ImageHub operations.
pub type AppResult<T> = Result<T, AppError>;
