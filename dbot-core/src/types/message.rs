//! Message type and command extraction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// A message in a chat. `from` is absent for channel posts and anonymous admins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub text: Option<String>,
}

impl Message {
    /// Sent time; `None` when the timestamp is out of range (inaccessible messages carry `0`).
    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.date, 0)
    }

    /// First token of the text when it starts with `/`, e.g. `/help@my_bot`.
    pub fn full_command(&self) -> Option<&str> {
        let text = self.text.as_deref()?;
        if !text.starts_with('/') {
            return None;
        }
        text.split(char::is_whitespace).next()
    }

    /// Lower-cased command name without the slash.
    ///
    /// `/name@other_bot` yields `None` when `bot_username` is known and differs.
    pub fn command(&self, bot_username: Option<&str>) -> Option<String> {
        let full = self.full_command()?.trim_start_matches('/');
        let (name, addressee) = match full.split_once('@') {
            Some((name, addressee)) => (name, Some(addressee)),
            None => (full, None),
        };
        if name.is_empty() {
            return None;
        }
        if let (Some(addressee), Some(bot)) = (addressee, bot_username) {
            if !addressee.eq_ignore_ascii_case(bot.trim_start_matches('@')) {
                return None;
            }
        }
        Some(name.to_lowercase())
    }

    /// Text after the command token; the whole text when the message is not a command.
    pub fn text_without_command(&self) -> Option<&str> {
        let text = self.text.as_deref()?;
        match self.full_command() {
            Some(full) => Some(text[full.len()..].trim_start()),
            None => Some(text),
        }
    }
}
