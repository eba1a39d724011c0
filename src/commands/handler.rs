//! Command handler implementation.

use tracing::{debug, info};

use super::types::BotCommand;
use crate::config::{Settings, Stage};

/// Handles bot commands against the startup configuration.
///
/// The handler is pure: it owns a read-only snapshot of the values that
/// appear in replies and never touches shared state, so every matching
/// message produces one independent reply.
pub struct CommandHandler {
    stage: Stage,
    port: u16,
    release_tag: String,
}

impl CommandHandler {
    /// Creates a new command handler from the process settings.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            stage: settings.stage,
            port: settings.port(),
            release_tag: settings.release_tag.clone(),
        }
    }

    /// Tries to parse and execute a command from a message.
    ///
    /// Commands are only honored in private (one-to-one) chats; group
    /// messages and non-command text yield no reply.
    #[must_use]
    pub fn try_handle(&self, text: &str, is_private: bool, chat_id: i64) -> Option<String> {
        let command = BotCommand::parse(text)?;

        if !is_private {
            debug!("Ignoring {} outside a private chat (chat {})", command, chat_id);
            return None;
        }

        info!(
            "Handling {} from chat {} (stage {}, port {})",
            command, chat_id, self.stage, self.port
        );

        Some(match command {
            BotCommand::Start => self.greeting(chat_id),
        })
    }

    /// Renders the greeting for the configured stage.
    fn greeting(&self, chat_id: i64) -> String {
        match self.stage {
            Stage::Dev => format!(
                "Hello and welcome to my bot! Port {} and release tag {} and stage {}",
                self.port, self.release_tag, self.stage
            ),
            Stage::Prod => format!(
                "Hello and welcome to my bot! {} and port {} and release tag {} and stage {}",
                chat_id, self.port, self.release_tag, self.stage
            ),
        }
    }
}

impl std::fmt::Debug for CommandHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandHandler")
            .field("stage", &self.stage)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}
