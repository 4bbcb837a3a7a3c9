//! One command run against one update: the pre-execution gate and the reply relays.

use dbot_core::{
    CallbackQuery, ChosenInlineResult, Fields, InlineQuery, Message, Poll, PreCheckoutQuery,
    Response, Result, ShippingQuery, Update,
};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::command::Command;
use crate::context::{BotContext, CommandConfig};
use crate::descriptor::{CommandDescriptor, CommandRole};
use crate::registry::CommandRegistry;

/// A command bound to the bot context and (optionally) the update it is processing.
///
/// Configuration for the command is resolved from the context by name when the invocation is
/// created. Accessors for update variants return `None` when no update is stored or the variant
/// is not the populated one.
pub struct Invocation<'a> {
    context: &'a BotContext,
    command: &'a dyn Command,
    registry: Option<&'a CommandRegistry>,
    update: Option<Update>,
    config: CommandConfig,
}

impl<'a> Invocation<'a> {
    pub fn new(context: &'a BotContext, command: &'a dyn Command, update: Option<Update>) -> Self {
        let config = context.command_config(command.descriptor().name());
        Self {
            context,
            command,
            registry: None,
            update,
            config,
        }
    }

    /// Gives the command access to the other registered commands (used by `help`).
    pub fn with_registry(mut self, registry: &'a CommandRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replaces the stored update. `None` keeps the current one.
    pub fn set_update(&mut self, update: Option<Update>) -> &mut Self {
        if let Some(update) = update {
            self.update = Some(update);
        }
        self
    }

    pub fn update(&self) -> Option<&Update> {
        self.update.as_ref()
    }

    pub fn context(&self) -> &BotContext {
        self.context
    }

    pub fn registry(&self) -> Option<&CommandRegistry> {
        self.registry
    }

    pub fn descriptor(&self) -> &CommandDescriptor {
        self.command.descriptor()
    }

    pub fn name(&self) -> &str {
        self.descriptor().name()
    }

    pub fn description(&self) -> &str {
        self.descriptor().description()
    }

    pub fn usage(&self) -> &str {
        self.descriptor().usage()
    }

    pub fn version(&self) -> &str {
        self.descriptor().version()
    }

    pub fn show_in_help(&self) -> bool {
        self.descriptor().show_in_help()
    }

    pub fn is_private_only(&self) -> bool {
        self.descriptor().is_private_only()
    }

    /// Enabled by its descriptor and not disabled through the context.
    pub fn is_enabled(&self) -> bool {
        self.descriptor().is_enabled() && self.context.is_command_enabled(self.name())
    }

    pub fn role(&self) -> CommandRole {
        self.descriptor().role()
    }

    /// Full configuration of this command.
    pub fn config(&self) -> &CommandConfig {
        &self.config
    }

    /// Single configuration value; `None` when the key is missing.
    pub fn config_value(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    pub fn message(&self) -> Option<&Message> {
        self.update.as_ref().and_then(Update::message)
    }

    pub fn edited_message(&self) -> Option<&Message> {
        self.update.as_ref().and_then(Update::edited_message)
    }

    pub fn channel_post(&self) -> Option<&Message> {
        self.update.as_ref().and_then(Update::channel_post)
    }

    pub fn edited_channel_post(&self) -> Option<&Message> {
        self.update.as_ref().and_then(Update::edited_channel_post)
    }

    pub fn inline_query(&self) -> Option<&InlineQuery> {
        self.update.as_ref().and_then(Update::inline_query)
    }

    pub fn chosen_inline_result(&self) -> Option<&ChosenInlineResult> {
        self.update.as_ref().and_then(Update::chosen_inline_result)
    }

    pub fn callback_query(&self) -> Option<&CallbackQuery> {
        self.update.as_ref().and_then(Update::callback_query)
    }

    pub fn shipping_query(&self) -> Option<&ShippingQuery> {
        self.update.as_ref().and_then(Update::shipping_query)
    }

    pub fn pre_checkout_query(&self) -> Option<&PreCheckoutQuery> {
        self.update.as_ref().and_then(Update::pre_checkout_query)
    }

    pub fn poll(&self) -> Option<&Poll> {
        self.update.as_ref().and_then(Update::poll)
    }

    /// Message or edited message: the messages a user command can be triggered by.
    fn user_message(&self) -> Option<&Message> {
        self.message().or_else(|| self.edited_message())
    }

    /// Any message-like variant, including channel posts.
    fn any_message(&self) -> Option<&Message> {
        self.user_message()
            .or_else(|| self.channel_post())
            .or_else(|| self.edited_channel_post())
    }

    /// Gate, then execute. Evaluated in order:
    ///
    /// 1. needs a database but persistence is disabled or disconnected: [`Command::execute_no_db`];
    /// 2. private-only and triggered outside a private chat: delete the message, notify the
    ///    sender privately (empty response when the sender is unknown);
    /// 3. otherwise [`Command::execute`].
    #[instrument(skip(self), fields(command = %self.name()))]
    pub async fn pre_execute(&self) -> Result<Response> {
        if self.descriptor().need_mysql()
            && !(self.context.is_db_enabled() && self.context.is_db_connected())
        {
            warn!(command = %self.name(), "step: no database connection, running no-db fallback");
            return self.command.execute_no_db(self).await;
        }

        if self.is_private_only() && self.remove_non_private_message().await {
            let message = self.user_message();
            let sender = message.and_then(|m| m.from.as_ref());
            return match (message, sender) {
                (Some(message), Some(user)) => {
                    info!(
                        command = %self.name(),
                        user_id = user.id,
                        "step: private-only command used in public chat, notifying sender"
                    );
                    let text = format!(
                        "/{} command is only available in a private chat.\n(`{}`)",
                        self.name(),
                        message.text.as_deref().unwrap_or_default()
                    );
                    let mut fields = Fields::new();
                    fields.insert("chat_id".to_string(), Value::from(user.id));
                    fields.insert("parse_mode".to_string(), Value::from("Markdown"));
                    fields.insert("text".to_string(), Value::from(text));
                    self.context.transport().send_message(fields).await
                }
                _ => Ok(self.context.transport().empty_response()),
            };
        }

        self.command.execute(self).await
    }

    /// Deletes the triggering message when it was sent outside a private chat.
    ///
    /// Returns `true` when the delete was issued. The delete is best effort: a failed call is
    /// logged and still counts as issued.
    pub async fn remove_non_private_message(&self) -> bool {
        let Some(message) = self.user_message() else {
            return false;
        };
        if message.chat.is_private() {
            return false;
        }

        let mut fields = Fields::new();
        fields.insert("chat_id".to_string(), Value::from(message.chat.id));
        fields.insert("message_id".to_string(), Value::from(message.message_id));

        match self.context.transport().delete_message(fields).await {
            Ok(response) if !response.is_ok() => {
                warn!(
                    chat_id = message.chat.id,
                    message_id = message.message_id,
                    description = ?response.description,
                    "Delete of non-private message refused"
                );
            }
            Err(e) => {
                warn!(
                    error = %e,
                    chat_id = message.chat.id,
                    message_id = message.message_id,
                    "Failed to delete non-private message"
                );
            }
            Ok(_) => {}
        }
        true
    }

    /// Sends `text` to the chat the update came from. `extra` fields override `chat_id`/`text`.
    /// Empty response when the update carries no message.
    pub async fn reply_to_chat(&self, text: &str, extra: Fields) -> Result<Response> {
        match self.any_message() {
            Some(message) => self.send_to(message.chat.id, text, extra).await,
            None => Ok(self.context.transport().empty_response()),
        }
    }

    /// Sends `text` to the sender's private chat. `extra` fields override `chat_id`/`text`.
    /// Empty response when there is no message or no sender.
    pub async fn reply_to_user(&self, text: &str, extra: Fields) -> Result<Response> {
        match self.user_message().and_then(|m| m.from.as_ref()) {
            Some(user) => self.send_to(user.id, text, extra).await,
            None => Ok(self.context.transport().empty_response()),
        }
    }

    async fn send_to(&self, chat_id: i64, text: &str, extra: Fields) -> Result<Response> {
        let mut fields = Fields::new();
        fields.insert("chat_id".to_string(), Value::from(chat_id));
        fields.insert("text".to_string(), Value::from(text));
        fields.extend(extra);
        self.context.transport().send_message(fields).await
    }
}
