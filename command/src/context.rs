//! Bot context: the per-process handle commands read configuration and liveness from.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dbot_core::{Persistence, Transport};
use serde_json::{Map, Value};
use tracing::info;

/// Per-command configuration (`key -> value`), looked up by command name.
pub type CommandConfig = Map<String, Value>;

/// Owns the transport, the optional persistence handle, per-command configuration, admins and
/// runtime command toggles. One per running bot; invocations borrow it read-only.
pub struct BotContext {
    transport: Arc<dyn Transport>,
    persistence: Option<Arc<dyn Persistence>>,
    db_enabled: bool,
    bot_username: Option<String>,
    commands_config: HashMap<String, CommandConfig>,
    admins: HashSet<i64>,
    disabled_commands: HashSet<String>,
}

impl BotContext {
    /// Creates a context without persistence, admins or command configuration.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            persistence: None,
            db_enabled: false,
            bot_username: None,
            commands_config: HashMap::new(),
            admins: HashSet::new(),
            disabled_commands: HashSet::new(),
        }
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Attaches a database and marks persistence as enabled for this bot.
    pub fn enable_persistence(&mut self, persistence: Arc<dyn Persistence>) {
        info!("Persistence enabled");
        self.persistence = Some(persistence);
        self.db_enabled = true;
    }

    pub fn is_db_enabled(&self) -> bool {
        self.db_enabled
    }

    /// Liveness of the attached database; `false` when none is attached.
    pub fn is_db_connected(&self) -> bool {
        self.persistence
            .as_ref()
            .map(|p| p.is_connected())
            .unwrap_or(false)
    }

    pub fn set_bot_username(&mut self, username: impl Into<String>) {
        self.bot_username = Some(username.into());
    }

    pub fn bot_username(&self) -> Option<&str> {
        self.bot_username.as_deref()
    }

    /// Replaces the configuration of `command`.
    pub fn set_command_config(&mut self, command: impl Into<String>, config: CommandConfig) {
        self.commands_config.insert(command.into(), config);
    }

    /// Configuration of `command`; empty when none was set.
    pub fn command_config(&self, command: &str) -> CommandConfig {
        self.commands_config
            .get(command)
            .cloned()
            .unwrap_or_default()
    }

    pub fn enable_admin(&mut self, user_id: i64) {
        self.admins.insert(user_id);
    }

    pub fn enable_admins(&mut self, user_ids: impl IntoIterator<Item = i64>) {
        self.admins.extend(user_ids);
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admins.contains(&user_id)
    }

    pub fn disable_command(&mut self, command: impl Into<String>) {
        self.disabled_commands.insert(command.into());
    }

    pub fn enable_command(&mut self, command: &str) {
        self.disabled_commands.remove(command);
    }

    /// `false` only when the command was disabled through this context.
    pub fn is_command_enabled(&self, command: &str) -> bool {
        !self.disabled_commands.contains(command)
    }
}
