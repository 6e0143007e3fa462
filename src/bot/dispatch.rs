//! Command dispatch.

use mentat_proto::{Command, ParsedMessage};
use tracing::{debug, info};

use super::auth::Authorizer;
use super::command::{BotCommand, CommandParseError};
use super::handlers;
use crate::telemetry::spans;

/// Turns inbound chat into outbound commands.
///
/// Holds no mutable state: dispatching the same message twice yields the
/// same commands twice.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    auth: Authorizer,
}

impl Dispatcher {
    /// Create a dispatcher that only obeys `owner`.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            auth: Authorizer::new(owner),
        }
    }

    /// Authorize and run the command carried by `msg`, if any.
    ///
    /// Lines that are not command candidates produce nothing. A non-owner
    /// gets one denial reply. Unknown commands and missing arguments are
    /// silent.
    pub fn dispatch(&self, msg: &ParsedMessage) -> Vec<Command> {
        if !msg.is_command_candidate() {
            return Vec::new();
        }
        let Some(reply_to) = reply_target(msg) else {
            return Vec::new();
        };

        if !self.auth.is_authorized(&msg.origin) {
            info!(origin = %msg.origin, target = %reply_to, "Rejected command from non-owner");
            return vec![self.auth.denial(&msg.origin, reply_to)];
        }

        match BotCommand::parse(&msg.payload) {
            Ok(command) => {
                let _span = spans::command(command.name(), &msg.origin, reply_to).entered();
                let out = handlers::execute(&command, reply_to);
                debug!(replies = out.len(), "Command handled");
                out
            }
            Err(CommandParseError::MissingArgument { command, expected }) => {
                debug!(command, expected, "Ignoring command with missing arguments");
                Vec::new()
            }
            Err(CommandParseError::NotACommand) => Vec::new(),
        }
    }
}

/// Where replies go: the channel for channel chat, the sender for a query.
fn reply_target(msg: &ParsedMessage) -> Option<&str> {
    if msg.is_channel_message() {
        msg.target.as_deref()
    } else if msg.origin.is_empty() {
        None
    } else {
        Some(&msg.origin)
    }
}
