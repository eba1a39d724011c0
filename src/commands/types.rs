//! Command types and definitions.

use std::fmt;

/// Available bot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    /// Greet the user with the current stage, port and release tag.
    Start,
}

impl BotCommand {
    /// Parses a command from a message text.
    ///
    /// Only the first whitespace-delimited token is considered; an
    /// optional `@botname` suffix is stripped, so `/start@my_bot args`
    /// parses the same as `/start`.
    ///
    /// Returns `None` if the message is not a recognized command.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();

        let token = text.split_whitespace().next()?;
        let command = token.strip_prefix('/')?;

        // "/start@my_bot" addresses the command to a specific bot.
        let command = command.split('@').next().unwrap_or(command);

        match command.to_lowercase().as_str() {
            "start" => Some(Self::Start),
            _ => None,
        }
    }

    /// Returns the command name as it appears in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
        }
    }
}

impl fmt::Display for BotCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start() {
        assert_eq!(BotCommand::parse("/start"), Some(BotCommand::Start));
    }

    #[test]
    fn test_parse_start_with_args() {
        assert_eq!(BotCommand::parse("/start deep_link"), Some(BotCommand::Start));
    }

    #[test]
    fn test_parse_start_addressed() {
        assert_eq!(BotCommand::parse("/start@my_bot"), Some(BotCommand::Start));
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(BotCommand::parse("/START"), Some(BotCommand::Start));
    }

    #[test]
    fn test_parse_with_extra_whitespace() {
        assert_eq!(BotCommand::parse("  /start  "), Some(BotCommand::Start));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(BotCommand::parse("/help"), None);
        assert_eq!(BotCommand::parse("/started"), None);
    }

    #[test]
    fn test_parse_plain_text() {
        assert_eq!(BotCommand::parse("start"), None);
        assert_eq!(BotCommand::parse("hello there"), None);
        assert_eq!(BotCommand::parse(""), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(BotCommand::Start.to_string(), "/start");
    }
}
