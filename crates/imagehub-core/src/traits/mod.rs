//! Core traits defined in `imagehub-core` and implemented by other crates.

pub mod health;
pub mod storage;

pub use health::HealthProbe;
pub use storage::StorageProvider;
