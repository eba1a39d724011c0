//! Configuration module for the greeter bot.
//!
//! Handles loading and validation of the process configuration:
//! Telegram API credentials, deployment stage and release tag.

mod settings;

pub use settings::{ConfigError, Settings, Stage};
