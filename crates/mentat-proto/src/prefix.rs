//! Message prefix (origin) types.
//!
//! A prefix identifies who sent a line: `nick!user@host` for users, a bare
//! name for servers. Only the split at `!` matters to the bot; the part
//! before it is the identity that authorization compares against.

use std::fmt;
use std::str::FromStr;

/// Origin of an inbound line.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Prefix {
    /// Identity before the `!` separator (nickname or server name).
    pub origin: String,
    /// Everything after the `!` separator, usually `user@host`.
    pub host: Option<String>,
}

impl Prefix {
    /// Split a raw prefix (without the leading `:`) at its first `!`.
    ///
    /// This is lenient: no component is validated.
    pub fn new_from_str(s: &str) -> Self {
        let s = s.strip_prefix(':').unwrap_or(s);
        match s.split_once('!') {
            Some((origin, host)) => Prefix {
                origin: origin.to_owned(),
                host: Some(host.to_owned()),
            },
            None => Prefix {
                origin: s.to_owned(),
                host: None,
            },
        }
    }
}

impl FromStr for Prefix {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Prefix::new_from_str(s))
    }
}

impl From<&str> for Prefix {
    fn from(s: &str) -> Self {
        Prefix::new_from_str(s)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host {
            Some(host) => write!(f, "{}!{}", self.origin, host),
            None => f.write_str(&self.origin),
        }
    }
}
