//! # dbot-command
//!
//! Commands for the Telegram bot: a [`CommandDescriptor`] (identity and flags), a [`Command`]
//! capability (execute logic), and an [`Invocation`] that gates execution (persistence required,
//! private chat only) and relays replies into the originating chat.
//! [`CommandRegistry`] routes each update to a command by name.

pub mod command;
pub mod commands;
pub mod context;
pub mod descriptor;
pub mod invocation;
pub mod registry;

pub use command::Command;
pub use commands::{
    GenericCommand, GenericMessageCommand, HelpCommand, StartCommand, StatsCommand,
    WhoamiCommand,
};
pub use context::{BotContext, CommandConfig};
pub use descriptor::{CommandDescriptor, CommandRole};
pub use invocation::Invocation;
pub use registry::{CommandRegistry, GENERIC_COMMAND, GENERIC_MESSAGE_COMMAND};
