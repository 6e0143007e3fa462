//! Session lifecycle states.

use std::fmt;

/// Where a session is in its lifecycle.
///
/// The only path forward is
/// `Disconnected -> Connecting -> Connected -> Joined -> Listening`, and any
/// live state may drop back to `Disconnected`. There is no reconnect edge
/// out of a dropped session other than starting over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No transport.
    #[default]
    Disconnected,
    /// TCP connect in progress.
    Connecting,
    /// Transport open, registration may be sent.
    Connected,
    /// Registration sent and the default channel joined.
    Joined,
    /// Receive loop running.
    Listening,
}

impl SessionState {
    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Disconnected, Connecting)
                | (Connecting, Connected)
                | (Connected, Joined)
                | (Joined, Listening)
                | (Connecting | Connected | Joined | Listening, Disconnected)
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Disconnected => "disconnected",
            SessionState::Connecting => "connecting",
            SessionState::Connected => "connected",
            SessionState::Joined => "joined",
            SessionState::Listening => "listening",
        };
        f.write_str(name)
    }
}
