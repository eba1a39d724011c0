//! Telegram client wrapper module.
//!
//! Provides high-level abstractions for interacting with Telegram:
//! bot-token sign in and the command responder loop.

mod client;
mod responder;

pub use client::{TelegramBot, TelegramError};
pub use grammers_client::Update;
pub use responder::{CommandResponder, ResponderMessage};
