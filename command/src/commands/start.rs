//! `/start`: greeting shown when a user opens the bot.

use async_trait::async_trait;
use dbot_core::{Fields, Response, Result};
use serde_json::Value;

use crate::command::Command;
use crate::descriptor::{CommandDescriptor, CommandRole};
use crate::invocation::Invocation;

const DEFAULT_GREETING: &str = "Hi there!\nType /help to see all commands!";

/// Replies with the `greeting` config value, or a default greeting.
pub struct StartCommand {
    descriptor: CommandDescriptor,
}

impl StartCommand {
    pub fn new() -> Self {
        Self {
            descriptor: CommandDescriptor::new("start", CommandRole::User)
                .with_description("Start command")
                .with_show_in_help(false),
        }
    }
}

impl Default for StartCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for StartCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, invocation: &Invocation<'_>) -> Result<Response> {
        let greeting = invocation
            .config_value("greeting")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_GREETING);
        invocation.reply_to_chat(greeting, Fields::new()).await
    }
}
