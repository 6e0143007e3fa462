//! # mentat-proto
//!
//! The wire layer of the Mentat IRC bot: line framing, message parsing and
//! outbound command encoding.
//!
//! ## Features
//!
//! - Newline framing over any async byte stream, tolerant of partial reads
//! - A positional parser that extracts origin, verb, target and payload
//! - A closed set of outbound wire commands with `Display` serialization
//! - A framed [`Transport`] shared by the read and write paths
//!
//! ## Quick Start
//!
//! ```rust
//! use mentat_proto::{Command, ParsedMessage};
//!
//! let msg = ParsedMessage::parse(":iruan!user@host PRIVMSG #test :!ping hello").unwrap();
//! assert_eq!(msg.origin, "iruan");
//! assert_eq!(msg.target.as_deref(), Some("#test"));
//! assert_eq!(msg.payload, "!ping hello");
//!
//! let reply = Command::privmsg("#test", "PONG hello");
//! assert_eq!(reply.to_string(), "PRIVMSG #test :PONG hello");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod line;
pub mod message;
pub mod prefix;
pub mod transport;

pub use self::command::Command;
pub use self::error::{MessageParseError, ProtocolError, TransportError};
pub use self::line::{LineCodec, DEFAULT_MAX_LINE_LEN};
pub use self::message::ParsedMessage;
pub use self::prefix::Prefix;
pub use self::transport::Transport;

/// Character that marks chat text as a bot instruction.
pub const COMMAND_PREFIX: char = '!';

/// Character every channel name carries.
pub const CHANNEL_PREFIX: char = '#';

/// Protocol verb that delivers chat text.
pub const CHAT_VERB: &str = "PRIVMSG";
