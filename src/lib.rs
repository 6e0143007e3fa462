//! Mentat: a minimal IRC bot.
//!
//! The bot connects to one server, registers, joins its default channel and
//! answers a handful of `!commands` from a single configured owner.
//!
//! - [`config`]: connection parameters and their on-disk formats
//! - [`session`]: the connection lifecycle and receive loop
//! - [`bot`]: authorization, command grammar and handlers
//! - [`error`]: the errors that end a session
//! - [`telemetry`]: logging setup

pub mod bot;
pub mod config;
pub mod error;
pub mod session;
pub mod telemetry;

pub use config::Config;
pub use error::{SessionError, SessionResult};
pub use session::{Session, SessionState};
