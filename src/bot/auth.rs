//! Owner authorization.

use mentat_proto::Command;

/// Gatekeeper for bot commands.
///
/// The owner is matched by exact, case-sensitive equality: `Iruan` is not
/// `iruan`, and `iruan_` is not either.
#[derive(Debug, Clone)]
pub struct Authorizer {
    owner: String,
}

impl Authorizer {
    /// Create an authorizer for the configured owner nickname.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
        }
    }

    /// Whether `origin` is exactly the owner.
    pub fn is_authorized(&self, origin: &str) -> bool {
        origin == self.owner
    }

    /// The single advisory reply sent to a sender who is not the owner.
    pub fn denial(&self, origin: &str, reply_to: &str) -> Command {
        Command::privmsg(
            reply_to,
            format!("{origin}: You have insufficient privileges."),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_only() {
        let auth = Authorizer::new("iruan");
        assert!(auth.is_authorized("iruan"));
        assert!(!auth.is_authorized("Iruan"));
        assert!(!auth.is_authorized("iruan_"));
        assert!(!auth.is_authorized("iru"));
        assert!(!auth.is_authorized(""));
    }

    #[test]
    fn test_denial_text() {
        let auth = Authorizer::new("iruan");
        assert_eq!(
            auth.denial("eve", "#test").to_string(),
            "PRIVMSG #test :eve: You have insufficient privileges."
        );
    }
}
