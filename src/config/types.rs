//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use super::defaults::{default_port, default_realname};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the file failed.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The TOML was malformed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A legacy line had no `=`.
    #[error("line {line}: expected key=value, got {content:?}")]
    MalformedLine { line: usize, content: String },
    /// A required key was absent.
    #[error("missing required key: {0}")]
    MissingKey(&'static str),
    /// The port was not a number in range.
    #[error("invalid port: {0:?}")]
    InvalidPort(String),
}

/// Connection parameters for one bot run.
///
/// Key names follow the legacy `login.txt` vocabulary in both formats.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Server hostname (e.g., "irc.libera.chat").
    pub host: String,
    /// Server port (default: 6667).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Bot nickname.
    pub nickname: String,
    /// The only nickname allowed to issue commands.
    #[serde(rename = "botowner")]
    pub owner: String,
    /// Username sent in USER; falls back to the nickname.
    #[serde(default)]
    pub identification: Option<String>,
    /// Server password, sent as PASS before registration.
    #[serde(default)]
    pub password: Option<String>,
    /// Real name sent in USER.
    #[serde(default = "default_realname")]
    pub realname: String,
    /// Channel joined right after registration.
    #[serde(rename = "defaultchannel")]
    pub default_channel: String,
}

impl Config {
    /// Load configuration from a file.
    ///
    /// `*.toml` files are parsed as TOML, anything else as `key=value` lines.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "toml") {
            Ok(toml::from_str(&content)?)
        } else {
            Self::from_key_value(&content)
        }
    }

    /// Parse the legacy `key=value` format.
    ///
    /// Blank lines and lines starting with `#` are skipped. Unknown keys are
    /// logged and ignored.
    pub fn from_key_value(content: &str) -> Result<Self, ConfigError> {
        let mut config = PartialConfig::default();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| ConfigError::MalformedLine {
                line: idx + 1,
                content: raw.to_string(),
            })?;
            let (key, value) = (key.trim(), value.trim().to_string());

            match key {
                "host" => config.host = Some(value),
                "port" => {
                    config.port = Some(value.parse().map_err(|_| ConfigError::InvalidPort(value))?)
                }
                "nickname" => config.nickname = Some(value),
                "botowner" => config.owner = Some(value),
                "identification" => config.identification = non_empty(value),
                "password" => config.password = non_empty(value),
                "realname" => config.realname = non_empty(value),
                "defaultchannel" => config.default_channel = Some(value),
                other => warn!(key = %other, line = idx + 1, "Ignoring unknown config key"),
            }
        }

        config.finish()
    }

    /// Username for the USER command.
    pub fn identification(&self) -> &str {
        self.identification.as_deref().unwrap_or(&self.nickname)
    }

    /// `host:port` for display and connecting.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Default)]
struct PartialConfig {
    host: Option<String>,
    port: Option<u16>,
    nickname: Option<String>,
    owner: Option<String>,
    identification: Option<String>,
    password: Option<String>,
    realname: Option<String>,
    default_channel: Option<String>,
}

impl PartialConfig {
    fn finish(self) -> Result<Config, ConfigError> {
        Ok(Config {
            host: self.host.ok_or(ConfigError::MissingKey("host"))?,
            port: self.port.unwrap_or_else(default_port),
            nickname: self.nickname.ok_or(ConfigError::MissingKey("nickname"))?,
            owner: self.owner.ok_or(ConfigError::MissingKey("botowner"))?,
            identification: self.identification,
            password: self.password,
            realname: self.realname.unwrap_or_else(default_realname),
            default_channel: self
                .default_channel
                .ok_or(ConfigError::MissingKey("defaultchannel"))?,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
