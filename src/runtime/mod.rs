//! Process runtime composition.
//!
//! [`start`] is the single explicit entry point: it launches the
//! auxiliary HTTP listener, connects the command responder, and returns
//! a pair of cancellable handles for the caller to compose. The two
//! tasks share nothing but the read-only settings captured at startup.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::commands::CommandHandler;
use crate::config::Settings;
use crate::http::{self, HealthState, HttpServerError, HttpServerHandle};
use crate::telegram::{CommandResponder, ResponderMessage, TelegramBot, TelegramError};

/// Errors that can occur during startup.
#[derive(Debug, Error)]
pub enum StartError {
    #[error("HTTP listener failed to start: {0}")]
    Http(#[from] HttpServerError),

    #[error("Telegram connection failed: {0}")]
    Telegram(#[from] TelegramError),
}

/// Handle to the running command responder.
#[derive(Debug)]
pub struct ResponderHandle {
    tx: mpsc::Sender<ResponderMessage>,
    task: JoinHandle<()>,
}

impl ResponderHandle {
    /// Signals the responder to stop and waits for it to finish.
    pub async fn shutdown(self) {
        let _ = self.tx.send(ResponderMessage::Shutdown).await;
        let _ = self.task.await;
    }
}

/// Handles to the two running components.
#[derive(Debug)]
pub struct Handles {
    /// Auxiliary HTTP listener.
    pub http: HttpServerHandle,

    /// Command responder.
    pub responder: ResponderHandle,
}

impl Handles {
    /// Stops both components.
    pub async fn shutdown(self) {
        self.responder.shutdown().await;
        self.http.shutdown().await;
    }
}

/// Starts the HTTP listener and the command responder.
///
/// The listener is bound before the Telegram connection is attempted,
/// so it accepts connections as soon as this function returns.
///
/// # Errors
///
/// Returns an error if the port is already bound or the Telegram
/// connection fails.
pub async fn start(settings: &Settings) -> Result<Handles, StartError> {
    let http = http::serve(settings.port(), HealthState::new(settings)).await?;

    let bot = Arc::new(TelegramBot::connect(settings).await?);
    let handler = CommandHandler::new(settings);
    let responder = CommandResponder::new(bot, handler);

    let (tx, rx) = mpsc::channel::<ResponderMessage>(8);
    let task = tokio::spawn(async move {
        responder.run(rx).await;
    });

    info!(
        "Started (stage {}, port {}, release tag {})",
        settings.stage,
        settings.port(),
        settings.release_tag
    );

    Ok(Handles {
        http,
        responder: ResponderHandle { tx, task },
    })
}
