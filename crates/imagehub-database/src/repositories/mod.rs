//! Repository traits and their PostgreSQL implementations.

pub mod image;
pub mod user;

pub use image::{ImageRepository, PgImageRepository};
pub use user::{PgUserRepository, UserRepository};
