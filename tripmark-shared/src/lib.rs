//! # Tripmark Shared Library
//!
//! This crate contains the domain types and business logic shared between the
//! Tripmark web server and its tests.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their CRUD operations
//! - `auth`: Password hashing and credential management
//! - `spots`: Spot service (ownership checks and input validation)
//! - `db`: SQLite pool construction and migrations

pub mod auth;
pub mod db;
pub mod models;
pub mod spots;

/// Current version of the Tripmark shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
