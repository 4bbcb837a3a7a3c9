//! Fallback for unknown, disabled, or forbidden commands.

use async_trait::async_trait;
use dbot_core::{Fields, Response, Result};

use crate::command::Command;
use crate::descriptor::{CommandDescriptor, CommandRole};
use crate::invocation::Invocation;
use crate::registry::GENERIC_COMMAND;

/// Tells the user the command they typed does not exist.
pub struct GenericCommand {
    descriptor: CommandDescriptor,
}

impl GenericCommand {
    pub fn new() -> Self {
        Self {
            descriptor: CommandDescriptor::new(GENERIC_COMMAND, CommandRole::System)
                .with_description("Handles generic commands or is executed by default when a command is not found")
                .with_show_in_help(false),
        }
    }
}

impl Default for GenericCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for GenericCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, invocation: &Invocation<'_>) -> Result<Response> {
        let typed = invocation
            .message()
            .or_else(|| invocation.edited_message())
            .and_then(|m| m.full_command());
        match typed {
            Some(command) => {
                let text = format!("Command {} not found.. :(", command);
                invocation.reply_to_chat(&text, Fields::new()).await
            }
            None => Ok(invocation.context().transport().empty_response()),
        }
    }
}
