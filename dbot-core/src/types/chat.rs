//! Chat identity type.

use serde::{Deserialize, Serialize};

/// Chat identity; `chat_type` is the Bot API `type` (`private`, `group`, `supergroup`, `channel`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub chat_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl Chat {
    pub fn is_private(&self) -> bool {
        self.chat_type == "private"
    }

    pub fn is_group(&self) -> bool {
        self.chat_type == "group" || self.chat_type == "supergroup"
    }

    pub fn is_channel(&self) -> bool {
        self.chat_type == "channel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat(chat_type: &str) -> Chat {
        Chat {
            id: 1,
            chat_type: chat_type.to_string(),
            title: None,
            username: None,
        }
    }

    #[test]
    fn test_chat_kind_predicates() {
        assert!(chat("private").is_private());
        assert!(!chat("group").is_private());
        assert!(chat("supergroup").is_group());
        assert!(chat("channel").is_channel());
        assert!(!chat("channel").is_group());
    }
}
