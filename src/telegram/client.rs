//! Telegram client wrapper for the greeter bot.

use grammers_client::{Client, Config, InitParams, InvocationError, Update};
use grammers_session::Session;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Settings;

/// Errors that can occur during Telegram operations.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Sign in failed: {0}")]
    SignInFailed(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("API invocation error: {0}")]
    Invocation(String),
}

impl From<InvocationError> for TelegramError {
    fn from(err: InvocationError) -> Self {
        Self::Invocation(err.to_string())
    }
}

/// High-level Telegram client wrapper.
///
/// Owns the underlying MTProto client, signed in with a bot token.
pub struct TelegramBot {
    client: Client,
}

impl TelegramBot {
    /// Connects to Telegram and signs in with the configured bot token.
    ///
    /// The session is persisted to `settings.session_path`, so restarts
    /// reuse the existing authorization instead of signing in again.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be loaded, the connection
    /// fails, or the bot token is rejected.
    pub async fn connect(settings: &Settings) -> Result<Self, TelegramError> {
        info!("Connecting to Telegram...");

        let session = Session::load_file_or_create(&settings.session_path)
            .map_err(|e| TelegramError::Session(e.to_string()))?;

        let client = Client::connect(Config {
            session,
            api_id: settings.api_id,
            api_hash: settings.api_hash.clone(),
            params: InitParams::default(),
        })
        .await
        .map_err(|e| TelegramError::Connection(e.to_string()))?;

        let is_authorized = client
            .is_authorized()
            .await
            .map_err(|e| TelegramError::Connection(e.to_string()))?;

        info!("Connected to Telegram. Authorized: {}", is_authorized);

        if !is_authorized {
            match client.bot_sign_in(&settings.bot_token).await {
                Ok(user) => {
                    info!(
                        "Signed in as bot {} (@{})",
                        user.id(),
                        user.username().unwrap_or("unnamed")
                    );
                }
                Err(e) => return Err(TelegramError::SignInFailed(e.to_string())),
            }

            client
                .session()
                .save_to_file(&settings.session_path)
                .map_err(|e| TelegramError::Session(e.to_string()))?;
            debug!("Session saved to {}", settings.session_path.display());
        }

        Ok(Self { client })
    }

    /// Checks if the client is authorized.
    ///
    /// # Errors
    ///
    /// Returns an error if the check fails.
    pub async fn is_authorized(&self) -> Result<bool, TelegramError> {
        self.client
            .is_authorized()
            .await
            .map_err(|e| TelegramError::Connection(e.to_string()))
    }

    /// Waits for the next update from Telegram.
    ///
    /// # Errors
    ///
    /// Returns an error if the update stream fails.
    pub async fn next_update(&self) -> Result<Update, TelegramError> {
        self.client.next_update().await.map_err(Into::into)
    }

    /// Returns a reference to the underlying client for advanced operations.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

impl std::fmt::Debug for TelegramBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramBot").finish_non_exhaustive()
    }
}
