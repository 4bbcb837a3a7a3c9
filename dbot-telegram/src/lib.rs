//! # dbot-telegram
//!
//! Telegram bot framework layer: env config, [`HttpTransport`] (the Bot API over reqwest),
//! update and user adapters, and the long-polling runner that feeds updates to a
//! [`dbot_command::CommandRegistry`] one at a time.

mod adapters;
mod config;
mod runner;
mod transport;

pub use adapters::{TelegramUpdateWrapper, TelegramUserWrapper};
pub use config::{TelegramConfig, DEFAULT_API_URL};
pub use runner::{fetch_updates, handle_update, poll_once, run_polling};
pub use transport::HttpTransport;
