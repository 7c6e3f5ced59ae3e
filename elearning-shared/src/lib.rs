//! # E-Learning Shared Library
//!
//! Data layer for the e-learning catalog: the SQLite pool, the schema
//! bootstrap, the entity models, and the course-catalog operations used by
//! the API server.
//!
//! ## Module Organization
//!
//! - `db`: connection pool and schema bootstrap
//! - `models`: one module per table with its SQL operations
//! - `catalog`: nested course creation, listing and detail

pub mod catalog;
pub mod db;
pub mod models;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
