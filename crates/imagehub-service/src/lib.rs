//! # imagehub-service
//!
//! Business logic service layer for ImageHub. Each service orchestrates
//! repositories, the storage provider, and authentication to implement
//! application-level use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod image;
pub mod user;

pub use context::RequestContext;
pub use image::{ImageContent, ImageService, ImageUpload, UpdateImageParams, UploadImageParams};
pub use user::{LoginResult, RegisterParams, UserService};
