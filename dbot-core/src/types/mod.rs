//! Core types: user, chat, message, the update union, and the Bot API response.
//!
//! One file per main type. Field names follow the Bot API JSON so updates deserialize directly.

mod chat;
mod message;
mod queries;
mod response;
mod update;
mod user;

pub use chat::Chat;
pub use message::Message;
pub use queries::{
    CallbackQuery, ChosenInlineResult, InlineQuery, Poll, PollOption, PreCheckoutQuery,
    ShippingQuery,
};
pub use response::{Fields, Response};
pub use update::{Update, UpdateKind, UpdateType};
pub use user::User;
