//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod pagination;
pub mod path;
pub mod query;

pub use auth::AuthUser;
pub use json::ApiJson;
pub use pagination::PaginationParams;
pub use path::parse_uuid;
pub use query::ApiQuery;
