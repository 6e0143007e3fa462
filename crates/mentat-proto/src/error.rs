//! Error types for the protocol layer.
//!
//! [`ProtocolError`] covers framing and encoding, [`MessageParseError`]
//! covers lines that cannot be decomposed, and [`TransportError`] is what the
//! session sees when the connection itself fails.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Framing and encoding errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Outbound text carried a character the wire format cannot hold.
    #[error("illegal control character: {0:?}")]
    IllegalControlChar(char),
}

/// Errors encountered when decomposing a line into its fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Line was empty after trimming.
    #[error("empty message")]
    EmptyMessage,

    /// Line had a prefix but no command verb after it.
    #[error("missing command verb in {0:?}")]
    MissingCommand(String),
}

/// Errors that end a session's connection.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The peer closed the stream.
    #[error("connection closed by peer")]
    ConnectionClosed,

    /// An I/O error occurred.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A protocol error occurred while framing.
    #[error("transport protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}
