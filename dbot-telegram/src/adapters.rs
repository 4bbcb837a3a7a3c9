//! Adapters from Telegram payloads to dbot_core types.
//!
//! Updates arrive as raw Bot API JSON, which the core model reads directly. The bot identity
//! comes from teloxide's `getMe` and is mapped field by field.

use dbot_core::{Update, User};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> TelegramUserWrapper<'a> {
    pub fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            is_bot: self.0.is_bot,
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
            username: self.0.username.clone(),
        }
    }
}

/// Wraps one raw update from `getUpdates` for conversion to a core [`Update`].
pub struct TelegramUpdateWrapper<'a>(pub &'a Value);

impl<'a> TelegramUpdateWrapper<'a> {
    /// `None` when the payload has no numeric `update_id`.
    pub fn update_id(&self) -> Option<i64> {
        self.0.get("update_id").and_then(Value::as_i64)
    }

    /// `None` for update kinds the core model does not carry (e.g. `my_chat_member`).
    pub fn to_core(&self) -> Option<Update> {
        match Update::deserialize(self.0) {
            Ok(update) => Some(update),
            Err(e) => {
                warn!(update_id = ?self.update_id(), error = %e, "Unsupported update kind");
                None
            }
        }
    }
}
