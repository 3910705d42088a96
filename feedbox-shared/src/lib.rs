//! # Feedbox Shared Library
//!
//! Persistence layer for the Feedbox work-log backend: developers, projects,
//! reports and tasks stored in PostgreSQL.
//!
//! ## Module Organization
//!
//! - `db`: connection pool and schema setup
//! - `models`: row types, creation inputs and their SQL
//! - `storage`: validated, transactional access used by the API server

pub mod db;
pub mod models;
pub mod storage;

/// Current version of the Feedbox shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
