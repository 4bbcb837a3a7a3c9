//! SQLite connection pool wrapper for the storage crate.

use std::str::FromStr;

use dbot_core::Persistence;
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::StorageError;

/// Manages a single SQLite pool; creates the DB file if missing.
///
/// Its liveness is what commands needing a database check before they run.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Creates a pool for the given database URL: a file path, or a `sqlite:` URL such as
    /// `sqlite::memory:` (in-memory databases use a single connection so all queries see one DB).
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        info!("Initializing SQLite pool: {}", database_url);

        let options = if database_url.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(database_url)
                .map_err(|e| StorageError::InvalidUrl(format!("{}: {}", database_url, e)))?
        } else {
            SqliteConnectOptions::new().filename(database_url.trim_start_matches("file:"))
        };
        let options = options.create_if_missing(true);

        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the pool; [`Persistence::is_connected`] reports `false` afterwards.
    pub async fn close(&self) {
        info!("Closing SQLite pool");
        self.pool.close().await;
    }
}

impl Persistence for SqlitePoolManager {
    fn is_connected(&self) -> bool {
        !self.pool.is_closed()
    }
}
