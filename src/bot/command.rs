//! Bot command grammar.
//!
//! A payload such as `!join ##sub` resolves to exactly one [`BotCommand`].
//! Names are matched case-sensitively; only the first argument is used by
//! the commands that take one.

use mentat_proto::COMMAND_PREFIX;
use thiserror::Error;

/// A recognized owner instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// `!help`
    Help,
    /// `!ping <target>`
    Ping { target: String },
    /// `!join <#channel>`
    Join { channel: String },
    /// `!leave <#channel>`
    Leave { channel: String },
    /// Any other `!name`; produces no output.
    Unknown { name: String },
}

/// Why a payload did not resolve to a runnable command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("payload does not start with '!'")]
    NotACommand,
    #[error("!{command} needs {expected} argument(s)")]
    MissingArgument {
        command: &'static str,
        expected: usize,
    },
}

impl BotCommand {
    /// Resolve a payload into a command.
    ///
    /// # Errors
    ///
    /// [`CommandParseError::NotACommand`] when the payload lacks the prefix,
    /// [`CommandParseError::MissingArgument`] when a known command is given
    /// too few arguments.
    pub fn parse(payload: &str) -> Result<Self, CommandParseError> {
        let body = payload
            .strip_prefix(COMMAND_PREFIX)
            .ok_or(CommandParseError::NotACommand)?;

        // The name is everything up to the first whitespace, even if empty.
        let (name, rest) = body.split_once(char::is_whitespace).unwrap_or((body, ""));
        let first_arg = rest.split_whitespace().next().map(str::to_owned);

        let require = |command: &'static str| {
            first_arg.clone().ok_or(CommandParseError::MissingArgument {
                command,
                expected: 1,
            })
        };

        Ok(match name {
            "help" => BotCommand::Help,
            "ping" => BotCommand::Ping {
                target: require("ping")?,
            },
            "join" => BotCommand::Join {
                channel: require("join")?,
            },
            "leave" => BotCommand::Leave {
                channel: require("leave")?,
            },
            other => BotCommand::Unknown {
                name: other.to_owned(),
            },
        })
    }

    /// The command name without its prefix.
    pub fn name(&self) -> &str {
        match self {
            BotCommand::Help => "help",
            BotCommand::Ping { .. } => "ping",
            BotCommand::Join { .. } => "join",
            BotCommand::Leave { .. } => "leave",
            BotCommand::Unknown { name } => name,
        }
    }
}
