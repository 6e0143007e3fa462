//! Unified error handling for mentat.
//!
//! Only [`SessionError`] crosses the session boundary. Parse failures,
//! authorization denials and arity mismatches are handled inside the
//! dispatch path and never surface here.

use mentat_proto::TransportError;
use thiserror::Error;

use crate::session::SessionState;

/// Errors that end a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The TCP connection could not be opened.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing the link failed, or the peer closed it.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server sent `ERROR`.
    #[error("server closed the link: {0}")]
    ServerError(String),

    /// An operation needed a transport and there was none.
    #[error("session is not connected")]
    NotConnected,

    /// A lifecycle step was attempted out of order.
    #[error("invalid session transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: SessionState,
        to: SessionState,
    },
}

impl SessionError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Connect { .. } => "connect_failed",
            Self::Transport(TransportError::ConnectionClosed) => "connection_closed",
            Self::Transport(_) => "transport_error",
            Self::ServerError(_) => "server_error",
            Self::NotConnected => "not_connected",
            Self::InvalidTransition { .. } => "invalid_transition",
        }
    }

    /// Whether the peer simply went away.
    pub fn is_connection_closed(&self) -> bool {
        matches!(self, Self::Transport(TransportError::ConnectionClosed))
    }
}

/// Result type for session operations.
pub type SessionResult<T = ()> = Result<T, SessionError>;
