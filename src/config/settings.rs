//! Environment-derived process settings.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Deployment stage discriminator.
///
/// Selects both the greeting template and the port the auxiliary
/// HTTP listener binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Dev,
    Prod,
}

impl Stage {
    /// Returns the HTTP listener port for this stage.
    #[must_use]
    pub const fn port(self) -> u16 {
        match self {
            Self::Dev => 800,
            Self::Prod => 8080,
        }
    }

    /// Returns the stage name as it appears in greetings and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Prod => "prod",
        }
    }
}

impl FromStr for Stage {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => Err(ConfigError::InvalidStage(other.to_owned())),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_session_path() -> PathBuf {
    PathBuf::from("stage_greeter.session")
}

fn default_release_tag() -> String {
    "Unknown".to_owned()
}

/// Process configuration, read once at startup and immutable afterwards.
///
/// Constructed explicitly and passed by reference to both the responder
/// and the listener setup; there are no module-level singletons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Bot token (obtain from `@BotFather`).
    pub bot_token: String,

    /// Telegram API ID (obtain from <https://my.telegram.org>).
    pub api_id: i32,

    /// Telegram API hash (obtain from <https://my.telegram.org>).
    pub api_hash: String,

    /// Deployment stage.
    pub stage: Stage,

    /// Release tag surfaced in the greeting.
    #[serde(default = "default_release_tag")]
    pub release_tag: String,

    /// Path to the session file.
    #[serde(default = "default_session_path")]
    pub session_path: PathBuf,
}

impl Settings {
    /// Creates settings from environment variables.
    ///
    /// Expects `BOT_TOKEN`, `API_ID` and `API_HASH` to be set. `STAGE`
    /// defaults to `dev`, `RELEASE_TAG` to `"Unknown"`.
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token =
            std::env::var("BOT_TOKEN").map_err(|_| ConfigError::MissingEnvVar("BOT_TOKEN"))?;

        let api_id: i32 = std::env::var("API_ID")
            .map_err(|_| ConfigError::MissingEnvVar("API_ID"))?
            .parse()
            .map_err(|_| ConfigError::InvalidApiId)?;

        let api_hash =
            std::env::var("API_HASH").map_err(|_| ConfigError::MissingEnvVar("API_HASH"))?;

        let stage = match std::env::var("STAGE") {
            Ok(s) => s.parse()?,
            Err(_) => Stage::Dev,
        };

        let release_tag = std::env::var("RELEASE_TAG").unwrap_or_else(|_| default_release_tag());

        let session_path =
            std::env::var("SESSION_PATH").map_or_else(|_| default_session_path(), PathBuf::from);

        Ok(Self {
            bot_token,
            api_id,
            api_hash,
            stage,
            release_tag,
            session_path,
        })
    }

    /// Returns the HTTP listener port derived from the stage.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.stage.port()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid API ID format (must be an integer)")]
    InvalidApiId,

    #[error("Invalid STAGE value: '{0}' (expected 'dev' or 'prod')")]
    InvalidStage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings(stage: Stage) -> Settings {
        Settings {
            bot_token: "123:abc".to_owned(),
            api_id: 12345,
            api_hash: "abc123".to_owned(),
            stage,
            release_tag: default_release_tag(),
            session_path: default_session_path(),
        }
    }

    #[test]
    fn test_stage_parse() {
        assert_eq!("dev".parse::<Stage>().ok(), Some(Stage::Dev));
        assert_eq!("prod".parse::<Stage>().ok(), Some(Stage::Prod));
        assert_eq!("PROD".parse::<Stage>().ok(), Some(Stage::Prod));
        assert!("staging".parse::<Stage>().is_err());
    }

    #[test]
    fn test_stage_port_mapping() {
        assert_eq!(Stage::Dev.port(), 800);
        assert_eq!(Stage::Prod.port(), 8080);
    }

    #[test]
    fn test_settings_port_follows_stage() {
        assert_eq!(test_settings(Stage::Dev).port(), 800);
        assert_eq!(test_settings(Stage::Prod).port(), 8080);
    }

    #[test]
    fn test_default_release_tag() {
        assert_eq!(test_settings(Stage::Dev).release_tag, "Unknown");
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Dev.to_string(), "dev");
        assert_eq!(Stage::Prod.to_string(), "prod");
    }
}
