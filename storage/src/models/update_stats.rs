//! Aggregate statistics for logged updates.
//!
//! Returned by UpdateRepository::get_stats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStats {
    pub total_updates: i64,
    pub unique_users: i64,
    pub unique_chats: i64,
    pub first_update: Option<DateTime<Utc>>,
    pub last_update: Option<DateTime<Utc>>,
}
