//! Integration test common infrastructure.
//!
//! Provides a scripted IRC server the bot can connect to.

pub mod server;

pub use server::{FakeServer, ServerConn};
