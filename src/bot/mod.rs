//! Owner command handling.
//!
//! Inbound chat flows through three stages, each a pure function of the
//! parsed message:
//!
//! 1. [`auth`]: is the origin the configured owner?
//! 2. [`command`]: which [`BotCommand`] does the payload name?
//! 3. [`handlers`]: which outbound commands does it produce?
//!
//! [`Dispatcher`] strings them together and is the only entry point the
//! session uses.

pub mod auth;
pub mod command;
pub mod dispatch;
pub mod handlers;

pub use auth::Authorizer;
pub use command::{BotCommand, CommandParseError};
pub use dispatch::Dispatcher;
