//! `/whoami`: shows the caller's Telegram identity. Private chats only.

use async_trait::async_trait;
use dbot_core::{Fields, Response, Result};

use crate::command::Command;
use crate::descriptor::{CommandDescriptor, CommandRole};
use crate::invocation::Invocation;

pub struct WhoamiCommand {
    descriptor: CommandDescriptor,
}

impl WhoamiCommand {
    pub fn new() -> Self {
        Self {
            descriptor: CommandDescriptor::new("whoami", CommandRole::User)
                .with_description("Show your id, name and username")
                .with_private_only(true),
        }
    }
}

impl Default for WhoamiCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for WhoamiCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, invocation: &Invocation<'_>) -> Result<Response> {
        let message = invocation.message().or_else(|| invocation.edited_message());
        let Some(user) = message.and_then(|m| m.from.as_ref()) else {
            return Ok(invocation.context().transport().empty_response());
        };

        let full_name = [user.first_name.as_deref(), user.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let text = format!(
            "Your id: {}\nName: {}\nUsername: {}",
            user.id,
            if full_name.is_empty() { "-" } else { full_name.as_str() },
            user.username.as_deref().unwrap_or("-"),
        );
        invocation.reply_to_chat(&text, Fields::new()).await
    }
}
