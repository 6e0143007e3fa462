//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: The [`Config`] bundle and its two on-disk formats
//! - [`validation`]: Startup checks that collect every problem at once
//! - [`defaults`]: Serde default value functions

mod defaults;
mod types;
mod validation;

pub use types::{Config, ConfigError};
pub use validation::{ValidationError, validate};
