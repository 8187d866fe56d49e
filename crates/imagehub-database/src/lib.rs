//! # imagehub-database
//!
//! PostgreSQL connection management, migrations, and the repository traits
//! used by the service layer together with their Postgres implementations.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{ImageRepository, PgImageRepository, PgUserRepository, UserRepository};
