//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use mentat_proto::CHANNEL_PREFIX;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// `host` is empty.
    #[error("host is required")]
    MissingHost,
    /// `port` is 0.
    #[error("port must be non-zero")]
    InvalidPort,
    /// `nickname` is empty.
    #[error("nickname is required")]
    MissingNickname,
    /// `nickname` contains whitespace.
    #[error("nickname must not contain whitespace, got {0:?}")]
    InvalidNickname(String),
    /// `botowner` is empty.
    #[error("botowner is required")]
    MissingOwner,
    /// `defaultchannel` lacks a `#`.
    #[error("defaultchannel must contain '#', got {0:?}")]
    InvalidDefaultChannel(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.host.trim().is_empty() {
        errors.push(ValidationError::MissingHost);
    }
    if config.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }

    if config.nickname.is_empty() {
        errors.push(ValidationError::MissingNickname);
    } else if config.nickname.contains(char::is_whitespace) {
        errors.push(ValidationError::InvalidNickname(config.nickname.clone()));
    }

    // An empty owner would authorize every prefix-less line.
    if config.owner.is_empty() {
        errors.push(ValidationError::MissingOwner);
    }

    if !config.default_channel.contains(CHANNEL_PREFIX) {
        errors.push(ValidationError::InvalidDefaultChannel(
            config.default_channel.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
