//! Update repository: logs incoming updates and answers aggregate queries.
//!
//! Uses SqlitePoolManager and the models (UpdateRecord, UpdateStats).
//! External: SQLite via sqlx; callers use save/get_by_update_id/get_stats etc.

use chrono::{DateTime, Utc};
use dbot_core::Persistence;
use tracing::info;

use crate::error::StorageError;
use crate::models::{UpdateRecord, UpdateStats};
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct UpdateRepository {
    pool_manager: SqlitePoolManager,
}

impl UpdateRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS updates (
                id TEXT PRIMARY KEY,
                update_id INTEGER NOT NULL,
                update_type TEXT NOT NULL,
                user_id INTEGER,
                chat_id INTEGER,
                username TEXT,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_updates_update_id ON updates(update_id);
            CREATE INDEX IF NOT EXISTS idx_updates_chat_id ON updates(chat_id);
            CREATE INDEX IF NOT EXISTS idx_updates_created_at ON updates(created_at);
            "#,
        )
        .execute(pool)
        .await?;

        info!("Database tables created successfully");
        Ok(())
    }

    /// The pool this repository writes through; doubles as the liveness probe.
    pub fn pool_manager(&self) -> &SqlitePoolManager {
        &self.pool_manager
    }

    pub async fn save(&self, record: &UpdateRecord) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO updates (id, update_id, update_type, user_id, chat_id, username, content, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(record.update_id)
        .bind(&record.update_type)
        .bind(record.user_id)
        .bind(record.chat_id)
        .bind(&record.username)
        .bind(&record.content)
        .bind(record.created_at)
        .execute(pool)
        .await?;

        info!(
            update_id = record.update_id,
            update_type = %record.update_type,
            "Saved update"
        );
        Ok(())
    }

    pub async fn get_by_update_id(
        &self,
        update_id: i64,
    ) -> Result<Option<UpdateRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let record =
            sqlx::query_as::<_, UpdateRecord>("SELECT * FROM updates WHERE update_id = ?")
                .bind(update_id)
                .fetch_optional(pool)
                .await?;

        Ok(record)
    }

    pub async fn get_recent_by_chat(
        &self,
        chat_id: i64,
        limit: i64,
    ) -> Result<Vec<UpdateRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let records: Vec<UpdateRecord> = sqlx::query_as::<_, UpdateRecord>(
            "SELECT * FROM updates WHERE chat_id = ? ORDER BY created_at DESC LIMIT ?",
        )
        .bind(chat_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        info!(
            chat_id = chat_id,
            count = records.len(),
            "Retrieved recent updates for chat"
        );

        Ok(records)
    }

    pub async fn get_stats(&self) -> Result<UpdateStats, StorageError> {
        let pool = self.pool_manager.pool();

        let total_updates: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM updates")
            .fetch_one(pool)
            .await?;

        let unique_users: (i64,) = sqlx::query_as("SELECT COUNT(DISTINCT user_id) FROM updates")
            .fetch_one(pool)
            .await?;

        let unique_chats: (i64,) = sqlx::query_as("SELECT COUNT(DISTINCT chat_id) FROM updates")
            .fetch_one(pool)
            .await?;

        let first_update: (Option<DateTime<Utc>>,) =
            sqlx::query_as("SELECT MIN(created_at) FROM updates")
                .fetch_one(pool)
                .await?;

        let last_update: (Option<DateTime<Utc>>,) =
            sqlx::query_as("SELECT MAX(created_at) FROM updates")
                .fetch_one(pool)
                .await?;

        Ok(UpdateStats {
            total_updates: total_updates.0,
            unique_users: unique_users.0,
            unique_chats: unique_chats.0,
            first_update: first_update.0,
            last_update: last_update.0,
        })
    }
}

impl Persistence for UpdateRepository {
    fn is_connected(&self) -> bool {
        self.pool_manager.is_connected()
    }
}
