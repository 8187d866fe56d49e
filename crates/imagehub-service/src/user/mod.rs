//! Registration, login, and profile lookup.

pub mod service;

pub use service::{LoginResult, RegisterParams, UserService};
