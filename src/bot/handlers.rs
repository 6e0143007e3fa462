//! Command handlers.
//!
//! Each handler takes the channel the command arrived on plus its argument
//! and returns the outbound commands, in the order they must be written.
//! None of them touch session state.

use mentat_proto::{CHANNEL_PREFIX, Command};

use super::command::BotCommand;

/// Version shown in the help banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a resolved command.
pub fn execute(command: &BotCommand, channel: &str) -> Vec<Command> {
    match command {
        BotCommand::Help => help(channel),
        BotCommand::Ping { target } => ping(channel, target),
        BotCommand::Join { channel: to_join } => join(channel, to_join),
        BotCommand::Leave { channel: to_leave } => leave(channel, to_leave),
        BotCommand::Unknown { .. } => Vec::new(),
    }
}

/// Fixed usage listing.
pub fn help(channel: &str) -> Vec<Command> {
    [
        format!("Mentat {VERSION} Commands:"),
        "  !ping <target>".to_string(),
        "  !join <#channel>".to_string(),
        "  !leave <#channel>".to_string(),
    ]
    .into_iter()
    .map(|line| Command::privmsg(channel, line))
    .collect()
}

/// Echo `target` back as `PONG <target>`.
pub fn ping(channel: &str, target: &str) -> Vec<Command> {
    if target.is_empty() {
        return Vec::new();
    }
    vec![Command::privmsg(channel, format!("PONG {target}"))]
}

/// Acknowledge in `channel`, then join `to_join`. The current channel stays.
pub fn join(channel: &str, to_join: &str) -> Vec<Command> {
    if !to_join.contains(CHANNEL_PREFIX) {
        return vec![invalid_channel(channel, to_join)];
    }
    vec![
        Command::privmsg(channel, format!("Joining channel: {to_join} ...")),
        Command::join(to_join),
    ]
}

/// Acknowledge in `channel`, then part `to_leave`.
pub fn leave(channel: &str, to_leave: &str) -> Vec<Command> {
    if !to_leave.contains(CHANNEL_PREFIX) {
        return vec![invalid_channel(channel, to_leave)];
    }
    vec![
        Command::privmsg(channel, format!("Leaving channel: {to_leave} ...")),
        Command::part(to_leave),
    ]
}

fn invalid_channel(channel: &str, given: &str) -> Command {
    Command::privmsg(channel, format!("Invalid channel: {given}"))
}
