//! Update record model for persistence.
//!
//! Maps to the `updates` table and is used by UpdateRepository.

use chrono::{DateTime, Utc};
use dbot_core::{Update, UpdateKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UpdateRecord {
    pub id: String,
    pub update_id: i64,
    pub update_type: String,
    pub user_id: Option<i64>,
    pub chat_id: Option<i64>,
    pub username: Option<String>,
    /// Message text, query text, or callback data; empty when the variant has none.
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl UpdateRecord {
    /// Creates a record for `update` with a generated UUID and current timestamp.
    pub fn from_update(update: &Update) -> Self {
        let content = match &update.kind {
            UpdateKind::Message(m)
            | UpdateKind::EditedMessage(m)
            | UpdateKind::ChannelPost(m)
            | UpdateKind::EditedChannelPost(m) => m.text.clone(),
            UpdateKind::InlineQuery(q) => Some(q.query.clone()),
            UpdateKind::ChosenInlineResult(r) => Some(r.result_id.clone()),
            UpdateKind::CallbackQuery(q) => q.data.clone(),
            UpdateKind::ShippingQuery(q) => Some(q.invoice_payload.clone()),
            UpdateKind::PreCheckoutQuery(q) => Some(q.invoice_payload.clone()),
            UpdateKind::Poll(p) => Some(p.question.clone()),
        };
        let sender = update.from();

        Self {
            id: Uuid::new_v4().to_string(),
            update_id: update.update_id,
            update_type: update.update_type().as_str().to_string(),
            user_id: sender.map(|u| u.id),
            chat_id: update.chat_id(),
            username: sender.and_then(|u| u.username.clone()),
            content: content.unwrap_or_default(),
            created_at: Utc::now(),
        }
    }
}
