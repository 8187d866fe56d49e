//! Image management: inspection of uploaded bytes and per-user CRUD.

pub mod inspect;
pub mod service;

pub use inspect::{ImageInfo, inspect_image, sanitize_filename};
pub use service::{ImageContent, ImageService, ImageUpload, UpdateImageParams, UploadImageParams};
