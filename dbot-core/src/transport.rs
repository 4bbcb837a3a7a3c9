//! Outbound Bot API seam.
//!
//! [`Transport`] is transport-agnostic: implementations map a method name plus named fields to a
//! request (e.g. HTTP to the Telegram Bot API). Tests substitute a recording implementation.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::{Fields, Response};

/// Longest text the Bot API accepts in a single `sendMessage`.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// Sends Bot API calls and returns their [`Response`].
///
/// Network failures are errors; a Bot API refusal (`ok: false`) is a normal response value.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues `method` with the given fields.
    async fn call(&self, method: &str, fields: Fields) -> Result<Response>;

    /// Sends a text message. Texts longer than [`MAX_MESSAGE_LENGTH`] characters go out as
    /// consecutive messages; the response of the last one is returned.
    async fn send_message(&self, fields: Fields) -> Result<Response> {
        let text = fields.get("text").and_then(Value::as_str).map(str::to_owned);
        match text {
            Some(text) if text.chars().count() > MAX_MESSAGE_LENGTH => {
                let chars: Vec<char> = text.chars().collect();
                let mut last = self.empty_response();
                for chunk in chars.chunks(MAX_MESSAGE_LENGTH) {
                    let mut part = fields.clone();
                    part.insert("text".to_string(), Value::String(chunk.iter().collect()));
                    last = self.call("sendMessage", part).await?;
                }
                Ok(last)
            }
            _ => self.call("sendMessage", fields).await,
        }
    }

    /// Deletes a message; needs `chat_id` and `message_id`.
    async fn delete_message(&self, fields: Fields) -> Result<Response> {
        self.call("deleteMessage", fields).await
    }

    /// The canonical no-op response.
    fn empty_response(&self) -> Response {
        Response::empty()
    }
}
