//! Command responder loop.
//!
//! The responder drains the update stream and answers private `/start`
//! messages:
//! 1. Wait for the next update (or a shutdown message)
//! 2. Ignore anything that is not an inbound chat message
//! 3. Route the text through the command handler
//! 4. Send the reply back to the originating chat
//!
//! A failed send is logged and not retried; a failed update stream ends
//! the loop, since the connection is gone.

use std::sync::Arc;

use grammers_client::types::{Chat, Message};
use grammers_client::Update;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use super::TelegramBot;
use crate::commands::CommandHandler;

/// Messages that can be sent to the responder.
#[derive(Debug, Clone)]
pub enum ResponderMessage {
    /// Stop the responder.
    Shutdown,
}

/// Answers inbound commands over a persistent Telegram connection.
pub struct CommandResponder {
    /// Telegram bot client.
    bot: Arc<TelegramBot>,

    /// Command handler holding the startup configuration.
    handler: CommandHandler,
}

impl CommandResponder {
    /// Creates a new command responder.
    #[must_use]
    pub fn new(bot: Arc<TelegramBot>, handler: CommandHandler) -> Self {
        Self { bot, handler }
    }

    /// Runs the responder loop until shutdown or connection loss.
    pub async fn run(&self, mut rx: mpsc::Receiver<ResponderMessage>) {
        info!("Command responder started");

        loop {
            tokio::select! {
                msg = rx.recv() => {
                    match msg {
                        Some(ResponderMessage::Shutdown) | None => {
                            info!("Command responder shutting down");
                            break;
                        }
                    }
                }
                update = self.bot.next_update() => {
                    match update {
                        Ok(update) => self.process(update).await,
                        Err(e) => {
                            error!("Update stream failed: {}", e);
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Processes a single update from Telegram.
    async fn process(&self, update: Update) {
        let Update::NewMessage(message) = update else {
            return;
        };

        if message.outgoing() {
            return;
        }

        self.respond_to(&message).await;
    }

    /// Routes a message through the handler and sends the reply, if any.
    async fn respond_to(&self, message: &Message) {
        let chat = message.chat();
        let chat_id = chat.id();
        let is_private = matches!(chat, Chat::User(_));

        let Some(reply) = self.handler.try_handle(message.text(), is_private, chat_id) else {
            return;
        };

        debug!("Replying to chat {}: \"{}\"", chat_id, truncate(&reply, 40));

        if let Err(e) = message.respond(reply).await {
            error!("Failed to send reply to chat {}: {}", chat_id, e);
        }
    }
}

impl std::fmt::Debug for CommandResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandResponder")
            .field("handler", &self.handler)
            .finish_non_exhaustive()
    }
}

/// Truncates a string for logging.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_owned()
    } else {
        format!("{}...", s.chars().take(max_len).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello", 10), "Hello");
        assert_eq!(truncate("Hello, World!", 5), "Hello...");
    }
}
