//! `/stats`: update log statistics. Admin only; needs the database.

use async_trait::async_trait;
use dbot_core::{DbotError, Response, Result};
use storage::UpdateRepository;
use tracing::error;

use super::markdown;
use crate::command::Command;
use crate::descriptor::{CommandDescriptor, CommandRole};
use crate::invocation::Invocation;

pub struct StatsCommand {
    descriptor: CommandDescriptor,
    repo: UpdateRepository,
}

impl StatsCommand {
    pub fn new(repo: UpdateRepository) -> Self {
        Self {
            descriptor: CommandDescriptor::new("stats", CommandRole::Admin)
                .with_description("Show how many updates, users and chats the bot has seen")
                .with_need_mysql(true),
            repo,
        }
    }
}

#[async_trait]
impl Command for StatsCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, invocation: &Invocation<'_>) -> Result<Response> {
        let stats = self.repo.get_stats().await.map_err(|e| {
            error!(error = %e, "Failed to load update stats");
            DbotError::Database(e.to_string())
        })?;

        let format_time = |t: Option<chrono::DateTime<chrono::Utc>>| {
            t.map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "-".to_string())
        };
        let text = format!(
            "*Statistics*\nUpdates: {}\nUsers: {}\nChats: {}\nFirst update: {}\nLast update: {}",
            stats.total_updates,
            stats.unique_users,
            stats.unique_chats,
            format_time(stats.first_update),
            format_time(stats.last_update),
        );
        invocation.reply_to_chat(&text, markdown()).await
    }
}
