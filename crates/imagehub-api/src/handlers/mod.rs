//! HTTP request handlers, grouped by domain.

pub mod auth;
pub mod docs;
pub mod health;
pub mod image;
