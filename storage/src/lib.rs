//! Storage crate: update log persistence and the database liveness probe.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – UpdateRecord, UpdateStats
//! - [`update_repo`] – UpdateRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod models;
mod sqlite_pool;
mod update_repo;

pub use error::StorageError;
pub use models::{UpdateRecord, UpdateStats};
pub use sqlite_pool::SqlitePoolManager;
pub use update_repo::UpdateRepository;
