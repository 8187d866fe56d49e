//! # imagehub-entity
//!
//! Domain entity models for ImageHub. Every struct in this crate represents
//! a database table row or a value object used to create or update one.
//! Row types derive `sqlx::FromRow`.

pub mod image;
pub mod user;
