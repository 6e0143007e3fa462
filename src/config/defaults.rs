//! Default value functions for configuration.

/// Plain-text IRC port.
pub fn default_port() -> u16 {
    6667
}

pub fn default_realname() -> String {
    "Mentat".to_string()
}
