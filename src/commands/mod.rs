//! Command handling module.
//!
//! Processes user commands sent to the bot via private Telegram
//! messages. The only recognized command is `/start`.

mod handler;
mod types;

pub use handler::CommandHandler;
pub use types::BotCommand;
