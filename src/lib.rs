//! Stage Greeter Bot Library
//!
//! A Telegram bot that greets users with its deployment configuration.
//!
//! This crate provides the core functionality for:
//! - Loading configuration from environment variables
//! - Connecting to Telegram via `MTProto` with a bot token
//! - Answering private `/start` messages with a stage-aware greeting
//! - Serving a health-check HTTP endpoint on the stage-derived port

pub mod commands;
pub mod config;
pub mod http;
pub mod runtime;
pub mod telegram;
