//! # ClarityVault Shared Library
//!
//! Types, persistence and authentication shared by the ClarityVault API
//! server.
//!
//! ## Module Organization
//!
//! - `models`: database rows and their queries
//! - `db`: connection pool and embedded migrations
//! - `store`: storage traits and their PostgreSQL implementations
//! - `auth`: password hashing, JWT, login and the bearer-token middleware

pub mod auth;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the ClarityVault shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
