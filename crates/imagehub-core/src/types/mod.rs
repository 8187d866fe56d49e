//! Core type definitions used across the ImageHub workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
