//! # imagehub-storage
//!
//! Storage provider implementations for ImageHub. Image files live on the
//! local filesystem beneath a configured root directory.

pub mod providers;

pub use providers::local::LocalStorageProvider;
