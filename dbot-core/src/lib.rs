//! # dbot-core
//!
//! Core types and traits for the Telegram bot: the [`Update`] model, [`Response`] and [`Fields`],
//! the [`Transport`] and [`Persistence`] seams, errors, and tracing initialization.
//! Transport-agnostic; used by dbot-command, storage and dbot-telegram.

pub mod error;
pub mod logger;
pub mod persistence;
pub mod transport;
pub mod types;

pub use error::{CommandError, DbotError, Result};
pub use logger::init_tracing;
pub use persistence::Persistence;
pub use transport::{Transport, MAX_MESSAGE_LENGTH};
pub use types::{
    CallbackQuery, Chat, ChosenInlineResult, Fields, InlineQuery, Message, Poll, PollOption,
    PreCheckoutQuery, Response, ShippingQuery, Update, UpdateKind, UpdateType, User,
};
