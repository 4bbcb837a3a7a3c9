//! `/help`: lists commands, or shows the details of one.

use async_trait::async_trait;
use dbot_core::{Response, Result};

use super::{escape_markdown, markdown};
use crate::command::Command;
use crate::descriptor::{CommandDescriptor, CommandRole};
use crate::invocation::Invocation;

pub struct HelpCommand {
    descriptor: CommandDescriptor,
}

impl HelpCommand {
    pub fn new() -> Self {
        Self {
            descriptor: CommandDescriptor::new("help", CommandRole::User)
                .with_description("Show bot commands help")
                .with_usage("/help or /help <command>"),
        }
    }
}

impl Default for HelpCommand {
    fn default() -> Self {
        Self::new()
    }
}

/// Commands the caller may see: enabled, shown in help, not system; admin ones for admins only.
fn visible_commands<'r>(invocation: &'r Invocation<'_>) -> Vec<&'r CommandDescriptor> {
    let context = invocation.context();
    let is_admin = invocation
        .message()
        .or_else(|| invocation.edited_message())
        .and_then(|m| m.from.as_ref())
        .map(|u| context.is_admin(u.id))
        .unwrap_or(false);

    invocation
        .registry()
        .map(|r| r.descriptors())
        .unwrap_or_default()
        .into_iter()
        .filter(|d| {
            !d.is_system_command()
                && d.show_in_help()
                && d.is_enabled()
                && context.is_command_enabled(d.name())
                && (is_admin || !d.is_admin_command())
        })
        .collect()
}

#[async_trait]
impl Command for HelpCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, invocation: &Invocation<'_>) -> Result<Response> {
        let requested = invocation
            .message()
            .or_else(|| invocation.edited_message())
            .and_then(|m| m.text_without_command())
            .unwrap_or_default()
            .trim()
            .trim_start_matches('/')
            .to_lowercase();
        let commands = visible_commands(invocation);

        let text = if requested.is_empty() {
            let mut text = String::from("*Commands List*:\n");
            for command in &commands {
                text.push_str(&format!(
                    "/{} - {}\n",
                    escape_markdown(command.name()),
                    escape_markdown(command.description())
                ));
            }
            text.push_str("\nSend /help <command> to see more details.");
            text
        } else {
            match commands.iter().find(|d| d.name() == requested) {
                Some(command) => format!(
                    "Command: {} (v{})\nDescription: {}\nUsage: {}",
                    escape_markdown(command.name()),
                    escape_markdown(command.version()),
                    escape_markdown(command.description()),
                    escape_markdown(command.usage())
                ),
                None => format!(
                    "No help available: Command /{} not found",
                    escape_markdown(&requested)
                ),
            }
        };

        invocation.reply_to_chat(&text, markdown()).await
    }
}
