//! Health probe trait for backing services.

use async_trait::async_trait;

use crate::result::AppResult;

/// A dependency whose reachability is reported by the detailed health check.
#[async_trait]
pub trait HealthProbe: Send + Sync + std::fmt::Debug + 'static {
    /// Short component name (e.g., "postgres").
    fn component(&self) -> &str;

    /// Check whether the dependency is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
