//! Inbound message parsing.
//!
//! A framed line is decomposed positionally:
//!
//! ```text
//! :<origin>!<origin_host> <VERB> <param> ... <target> :<trailing text>
//! └──────── prefix ─────┘ └──── command/target segment ─┘ └─ trailing ─┘
//! ```
//!
//! Only a `PRIVMSG` whose command/target segment carries exactly one
//! parameter yields a payload. Every other shape parses successfully but with
//! an empty payload, so nothing downstream mistakes it for a command.

use std::str::FromStr;

use crate::error::MessageParseError;
use crate::prefix::Prefix;
use crate::{CHANNEL_PREFIX, CHAT_VERB, COMMAND_PREFIX};

/// Separator between the command/target segment and the trailing text.
const TRAILING_MARKER: &str = " :";

/// Structured view of one inbound line.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ParsedMessage {
    /// Identity that sent the line; empty when the line has no prefix.
    pub origin: String,
    /// Text after the `!` in the prefix, usually `user@host`.
    pub origin_host: Option<String>,
    /// Protocol verb, e.g. `PRIVMSG` or `PING`.
    pub verb: String,
    /// Last parameter of the command/target segment.
    pub target: Option<String>,
    /// Chat text of a recognized `PRIVMSG`; empty for everything else.
    pub payload: String,
    /// Raw trailing text for any verb (used for keepalive tokens).
    pub trailing: Option<String>,
}

impl ParsedMessage {
    /// Decompose a framed line.
    ///
    /// # Errors
    ///
    /// Returns [`MessageParseError::EmptyMessage`] for a blank line and
    /// [`MessageParseError::MissingCommand`] when no verb follows the prefix.
    pub fn parse(raw: &str) -> Result<Self, MessageParseError> {
        let line = raw.trim();
        if line.is_empty() {
            return Err(MessageParseError::EmptyMessage);
        }

        let (prefix, rest) = match line.strip_prefix(':') {
            Some(stripped) => {
                let (prefix, rest) = stripped
                    .split_once(char::is_whitespace)
                    .unwrap_or((stripped, ""));
                (Some(Prefix::new_from_str(prefix)), rest.trim_start())
            }
            None => (None, line),
        };

        if rest.starts_with(':') {
            return Err(MessageParseError::MissingCommand(line.to_owned()));
        }

        let (head, trailing) = match rest.find(TRAILING_MARKER) {
            Some(idx) => (&rest[..idx], Some(&rest[idx + TRAILING_MARKER.len()..])),
            None => (rest, None),
        };

        let mut tokens = head.split_whitespace();
        let verb = tokens
            .next()
            .ok_or_else(|| MessageParseError::MissingCommand(line.to_owned()))?;
        let params: Vec<&str> = tokens.collect();

        let is_chat_shape = verb.eq_ignore_ascii_case(CHAT_VERB) && params.len() == 1;
        let payload = match trailing {
            Some(text) if is_chat_shape => text.to_owned(),
            _ => String::new(),
        };

        let (origin, origin_host) = match prefix {
            Some(Prefix { origin, host }) => (origin, host),
            None => (String::new(), None),
        };

        Ok(ParsedMessage {
            origin,
            origin_host,
            verb: verb.to_owned(),
            target: params.last().map(|t| (*t).to_owned()),
            payload,
            trailing: trailing.map(str::to_owned),
        })
    }

    /// Whether the verb is `verb` (case-insensitive).
    pub fn is_verb(&self, verb: &str) -> bool {
        self.verb.eq_ignore_ascii_case(verb)
    }

    /// Whether this line is chat delivered to a channel or user.
    pub fn is_chat(&self) -> bool {
        !self.payload.is_empty()
    }

    /// Whether the payload is a bot instruction (starts with `!`).
    pub fn is_command_candidate(&self) -> bool {
        self.is_chat()
            && self.target.is_some()
            && self.payload.starts_with(COMMAND_PREFIX)
    }

    /// Whether the line was addressed to a channel rather than a nickname.
    pub fn is_channel_message(&self) -> bool {
        self.target
            .as_deref()
            .is_some_and(|t| t.starts_with(CHANNEL_PREFIX))
    }
}

impl FromStr for ParsedMessage {
    type Err = MessageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParsedMessage::parse(s)
    }
}
