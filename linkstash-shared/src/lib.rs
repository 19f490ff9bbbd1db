//! # Linkstash Shared Library
//!
//! This crate contains the data layer and domain logic shared by the
//! Linkstash API server and its tooling.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `auth`: Bearer-token identity and ownership authorization
//! - `db`: Connection pooling and migrations
//! - `pagination`: Page slicing and response metadata
//! - `url`: Link normalization and validation

pub mod auth;
pub mod db;
pub mod models;
pub mod pagination;
pub mod url;

/// Current version of the Linkstash shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
