//! Command registry: routes each update to a command by name and runs it through the gate.

use std::collections::HashMap;
use std::sync::Arc;

use dbot_core::{CommandError, Response, Result, Update, UpdateType};
use tracing::{debug, info, instrument};

use crate::command::Command;
use crate::context::BotContext;
use crate::descriptor::CommandDescriptor;
use crate::invocation::Invocation;

/// Fallback for unknown, disabled, or forbidden commands.
pub const GENERIC_COMMAND: &str = "generic";
/// Receives messages that do not start with a command.
pub const GENERIC_MESSAGE_COMMAND: &str = "genericmessage";

/// Registered commands keyed by (lower-case) name.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
}

/// Where an update goes: a command typed by a user, or a system command named by the framework.
enum Route {
    Command(String),
    System(String),
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command; a later command with the same name replaces the earlier one.
    pub fn add_command(mut self, command: Arc<dyn Command>) -> Self {
        let name = command.descriptor().name().to_lowercase();
        self.commands.insert(name, command);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Command>> {
        self.commands.get(name)
    }

    /// Descriptors of all registered commands, sorted by name.
    pub fn descriptors(&self) -> Vec<&CommandDescriptor> {
        let mut descriptors: Vec<&CommandDescriptor> =
            self.commands.values().map(|c| c.descriptor()).collect();
        descriptors.sort_by(|a, b| a.name().cmp(b.name()));
        descriptors
    }

    /// Routes `update` and runs the selected command through [`Invocation::pre_execute`].
    ///
    /// - a message with a command goes to that command (admin commands only for admins);
    /// - a message without a command goes to [`GENERIC_MESSAGE_COMMAND`];
    /// - other variants go to the system command named after the variant without underscores
    ///   (`callbackquery`, `editedmessage`, ...).
    ///
    /// System routes without a registered, enabled command are acknowledged with the empty response.
    #[instrument(skip(self, context, update), fields(update_id = update.update_id))]
    pub async fn process_update(&self, context: &BotContext, update: Update) -> Result<Response> {
        match self.route(context, &update) {
            Route::Command(name) => self.execute_command(context, &name, update).await,
            Route::System(name) => match self.enabled(context, &name) {
                Some(command) => self.run(context, command, update).await,
                None => {
                    debug!(command = %name, "step: no system command registered, ignoring update");
                    Ok(context.transport().empty_response())
                }
            },
        }
    }

    /// Runs command `name`; unknown or disabled names fall back to [`GENERIC_COMMAND`].
    pub async fn execute_command(
        &self,
        context: &BotContext,
        name: &str,
        update: Update,
    ) -> Result<Response> {
        if let Some(command) = self.enabled(context, name) {
            return self.run(context, command, update).await;
        }
        if name == GENERIC_COMMAND {
            return Err(CommandError::GenericMissing.into());
        }
        info!(command = %name, "step: command unavailable, falling back to generic");
        match self.enabled(context, GENERIC_COMMAND) {
            Some(generic) => self.run(context, generic, update).await,
            None => Err(CommandError::GenericMissing.into()),
        }
    }

    fn enabled(&self, context: &BotContext, name: &str) -> Option<&Arc<dyn Command>> {
        self.commands.get(name).filter(|command| {
            command.descriptor().is_enabled() && context.is_command_enabled(name)
        })
    }

    fn route(&self, context: &BotContext, update: &Update) -> Route {
        let update_type = update.update_type();
        if update_type != UpdateType::Message {
            return Route::System(update_type.as_str().replace('_', ""));
        }

        let Some(message) = update.message() else {
            return Route::System(GENERIC_MESSAGE_COMMAND.to_string());
        };
        let Some(name) = message.command(context.bot_username()) else {
            return Route::System(GENERIC_MESSAGE_COMMAND.to_string());
        };

        let admin_only = self
            .commands
            .get(&name)
            .map(|c| c.descriptor().is_admin_command())
            .unwrap_or(false);
        let sender_is_admin = message
            .from
            .as_ref()
            .map(|u| context.is_admin(u.id))
            .unwrap_or(false);
        if admin_only && !sender_is_admin {
            info!(
                command = %name,
                user_id = ?message.from.as_ref().map(|u| u.id),
                "step: admin command used by non-admin"
            );
            return Route::Command(GENERIC_COMMAND.to_string());
        }

        let is_system = self
            .commands
            .get(&name)
            .map(|c| c.descriptor().is_system_command())
            .unwrap_or(false);
        if is_system {
            return Route::Command(GENERIC_COMMAND.to_string());
        }

        Route::Command(name)
    }

    async fn run(
        &self,
        context: &BotContext,
        command: &Arc<dyn Command>,
        update: Update,
    ) -> Result<Response> {
        let name = command.descriptor().name().to_string();
        info!(command = %name, "step: command started");
        let invocation = Invocation::new(context, command.as_ref(), Some(update)).with_registry(self);
        let response = invocation.pre_execute().await?;
        info!(command = %name, ok = response.is_ok(), "step: command finished");
        Ok(response)
    }
}
