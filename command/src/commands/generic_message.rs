//! Receives plain (non-command) messages.

use async_trait::async_trait;
use dbot_core::{Response, Result};

use crate::command::Command;
use crate::descriptor::{CommandDescriptor, CommandRole};
use crate::invocation::Invocation;
use crate::registry::GENERIC_MESSAGE_COMMAND;

/// Acknowledges plain messages without replying. Replace it to react to free text.
pub struct GenericMessageCommand {
    descriptor: CommandDescriptor,
}

impl GenericMessageCommand {
    pub fn new() -> Self {
        Self {
            descriptor: CommandDescriptor::new(GENERIC_MESSAGE_COMMAND, CommandRole::System)
                .with_description("Handle generic message")
                .with_show_in_help(false),
        }
    }
}

impl Default for GenericMessageCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for GenericMessageCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, invocation: &Invocation<'_>) -> Result<Response> {
        Ok(invocation.context().transport().empty_response())
    }
}
