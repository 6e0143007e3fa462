//! Outbound wire commands.
//!
//! Every line the bot writes is one of these variants. Serialization lives in
//! the `Display` impl so the codec and the tests agree on the exact bytes.

use std::fmt;

/// A protocol command sent to the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `PASS <password>`
    Pass(String),
    /// `NICK <nickname>`
    Nick(String),
    /// `USER <identification> <host> * :<real name>`
    User {
        /// Username / ident.
        identification: String,
        /// Host field (ignored by modern servers).
        host: String,
        /// Free-form real name.
        real_name: String,
    },
    /// `JOIN <channel>`
    Join(String),
    /// `PART <channel>`
    Part(String),
    /// `MODE <channel> <+/-flag> <nick>`
    Mode {
        /// Channel the mode applies to.
        channel: String,
        /// `true` for `+`, `false` for `-`.
        adding: bool,
        /// Mode letter.
        flag: char,
        /// Nickname the mode targets.
        nick: String,
    },
    /// `PRIVMSG <target> :<text>`
    Privmsg(String, String),
    /// `PONG :<token>`
    Pong(String),
    /// `QUIT :<reason>`
    Quit(Option<String>),
}

impl Command {
    /// `PRIVMSG` shorthand.
    pub fn privmsg(target: impl Into<String>, text: impl Into<String>) -> Self {
        Command::Privmsg(target.into(), text.into())
    }

    /// `JOIN` shorthand.
    pub fn join(channel: impl Into<String>) -> Self {
        Command::Join(channel.into())
    }

    /// `PART` shorthand.
    pub fn part(channel: impl Into<String>) -> Self {
        Command::Part(channel.into())
    }

    /// The protocol verb this command serializes with.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Pass(_) => "PASS",
            Command::Nick(_) => "NICK",
            Command::User { .. } => "USER",
            Command::Join(_) => "JOIN",
            Command::Part(_) => "PART",
            Command::Mode { .. } => "MODE",
            Command::Privmsg(..) => "PRIVMSG",
            Command::Pong(_) => "PONG",
            Command::Quit(_) => "QUIT",
        }
    }

    /// Whether this command changes protocol state rather than carrying chat.
    ///
    /// `JOIN`, `PART` and `MODE` are side effects; `PRIVMSG` is not.
    pub fn is_side_effect(&self) -> bool {
        matches!(
            self,
            Command::Join(_) | Command::Part(_) | Command::Mode { .. }
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Pass(p) => write!(f, "PASS {p}"),
            Command::Nick(n) => write!(f, "NICK {n}"),
            Command::User {
                identification,
                host,
                real_name,
            } => write!(f, "USER {identification} {host} * :{real_name}"),
            Command::Join(c) => write!(f, "JOIN {c}"),
            Command::Part(c) => write!(f, "PART {c}"),
            Command::Mode {
                channel,
                adding,
                flag,
                nick,
            } => {
                let sign = if *adding { '+' } else { '-' };
                write!(f, "MODE {channel} {sign}{flag} {nick}")
            }
            Command::Privmsg(t, m) => write!(f, "PRIVMSG {t} :{m}"),
            Command::Pong(token) => write!(f, "PONG :{token}"),
            Command::Quit(Some(reason)) => write!(f, "QUIT :{reason}"),
            Command::Quit(None) => f.write_str("QUIT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_lines() {
        assert_eq!(Command::Nick("mentat".into()).to_string(), "NICK mentat");
        let user = Command::User {
            identification: "mentat".into(),
            host: "irc.libera.chat".into(),
            real_name: "Mentat Bot".into(),
        };
        assert_eq!(user.to_string(), "USER mentat irc.libera.chat * :Mentat Bot");
        assert_eq!(Command::Pass("hunter2".into()).to_string(), "PASS hunter2");
    }

    #[test]
    fn test_channel_lines() {
        assert_eq!(Command::join("##sub").to_string(), "JOIN ##sub");
        assert_eq!(Command::part("#test").to_string(), "PART #test");
        let op = Command::Mode {
            channel: "#test".into(),
            adding: true,
            flag: 'o',
            nick: "iruan".into(),
        };
        assert_eq!(op.to_string(), "MODE #test +o iruan");
        let deop = Command::Mode {
            channel: "#test".into(),
            adding: false,
            flag: 'o',
            nick: "eve".into(),
        };
        assert_eq!(deop.to_string(), "MODE #test -o eve");
    }

    #[test]
    fn test_privmsg_always_uses_trailing() {
        assert_eq!(
            Command::privmsg("#test", "PONG hello").to_string(),
            "PRIVMSG #test :PONG hello"
        );
        assert_eq!(Command::privmsg("#test", "").to_string(), "PRIVMSG #test :");
    }

    #[test]
    fn test_quit_and_pong() {
        assert_eq!(Command::Quit(None).to_string(), "QUIT");
        assert_eq!(Command::Quit(Some("bye".into())).to_string(), "QUIT :bye");
        assert_eq!(Command::Pong("irc.example.com".into()).to_string(), "PONG :irc.example.com");
    }

    #[test]
    fn test_side_effects() {
        assert!(Command::join("#a").is_side_effect());
        assert!(Command::part("#a").is_side_effect());
        assert!(!Command::privmsg("#a", "hi").is_side_effect());
        assert_eq!(Command::privmsg("#a", "hi").verb(), "PRIVMSG");
    }
}
