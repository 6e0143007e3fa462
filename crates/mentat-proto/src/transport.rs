//! Framed transport over an async byte stream.
//!
//! One [`Transport`] owns both directions of the connection. Reads yield
//! framed lines; writes take [`Command`]s. Because both go through the same
//! `&mut self`, a session that owns the transport is its only writer.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tracing::{trace, warn};

use crate::command::Command;
use crate::error::TransportError;
use crate::line::LineCodec;

/// Line transport over any `AsyncRead + AsyncWrite` stream.
#[derive(Debug)]
pub struct Transport<S = TcpStream> {
    framed: Framed<S, LineCodec>,
}

impl Transport<TcpStream> {
    /// Create a new TCP transport from a connected stream.
    pub fn tcp(stream: TcpStream) -> Self {
        if let Err(e) = Self::enable_keepalive(&stream) {
            warn!("failed to enable TCP keepalive: {}", e);
        }
        Self::new(stream)
    }

    fn enable_keepalive(stream: &TcpStream) -> std::io::Result<()> {
        use socket2::{SockRef, TcpKeepalive};

        let sock = SockRef::from(stream);
        let keepalive = TcpKeepalive::new()
            .with_time(Duration::from_secs(120))
            .with_interval(Duration::from_secs(30));

        sock.set_tcp_keepalive(&keepalive)
    }
}

impl<S> Transport<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap a stream with the default line codec.
    pub fn new(stream: S) -> Self {
        Self::with_codec(stream, LineCodec::new())
    }

    /// Wrap a stream with a custom codec (e.g. a different line limit).
    pub fn with_codec(stream: S, codec: LineCodec) -> Self {
        Self {
            framed: Framed::new(stream, codec),
        }
    }

    /// Read the next framed line.
    ///
    /// # Errors
    ///
    /// [`TransportError::ConnectionClosed`] at end of stream, otherwise the
    /// underlying I/O or framing error.
    pub async fn read_line(&mut self) -> Result<String, TransportError> {
        match self.framed.next().await {
            Some(Ok(line)) => {
                trace!(line = %line, "<-");
                Ok(line)
            }
            Some(Err(e)) => Err(TransportError::from(e)),
            None => Err(TransportError::ConnectionClosed),
        }
    }

    /// Write one command and flush it.
    pub async fn write_command(&mut self, command: Command) -> Result<(), TransportError> {
        trace!(line = %command, "->");
        self.framed.send(command).await?;
        Ok(())
    }

    /// Write several commands in order, flushing once at the end.
    pub async fn write_commands<I>(&mut self, commands: I) -> Result<(), TransportError>
    where
        I: IntoIterator<Item = Command>,
    {
        for command in commands {
            trace!(line = %command, "->");
            self.framed.feed(command).await?;
        }
        SinkExt::<Command>::flush(&mut self.framed).await?;
        Ok(())
    }

    /// Flush and shut down the write half of the stream.
    pub async fn close(&mut self) -> Result<(), TransportError> {
        SinkExt::<Command>::close(&mut self.framed).await?;
        Ok(())
    }
}
