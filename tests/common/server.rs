//! Fake IRC server.
//!
//! Listens on an ephemeral loopback port and lets a test play the server
//! side of a single bot connection line by line.

use mentat::Config;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// A listening fake server.
pub struct FakeServer {
    listener: TcpListener,
    addr: SocketAddr,
}

impl FakeServer {
    /// Bind on `127.0.0.1:0`.
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        Ok(Self { listener, addr })
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// A bot configuration pointing at this server.
    pub fn config(&self, owner: &str) -> Config {
        Config {
            host: self.addr.ip().to_string(),
            port: self.port(),
            nickname: "mentat".to_string(),
            owner: owner.to_string(),
            identification: None,
            password: None,
            realname: "Mentat".to_string(),
            default_channel: "#test".to_string(),
        }
    }

    /// Accept the bot's connection.
    pub async fn accept(&self) -> anyhow::Result<ServerConn> {
        let (stream, _) = timeout(RECV_TIMEOUT, self.listener.accept()).await??;
        let (read_half, writer) = stream.into_split();
        Ok(ServerConn {
            reader: BufReader::new(read_half),
            writer,
        })
    }
}

/// Server side of one accepted connection.
pub struct ServerConn {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl ServerConn {
    /// Send one raw line; `\r\n` is appended.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\r\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive one line from the bot, without its terminator.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        let mut line = String::new();
        let read = timeout(RECV_TIMEOUT, self.reader.read_line(&mut line)).await??;
        if read == 0 {
            anyhow::bail!("bot closed the connection");
        }
        anyhow::ensure!(line.ends_with("\r\n"), "line not CRLF terminated: {line:?}");
        Ok(line.trim_end_matches("\r\n").to_string())
    }

    /// Receive `count` lines.
    pub async fn recv_n(&mut self, count: usize) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::with_capacity(count);
        for _ in 0..count {
            lines.push(self.recv().await?);
        }
        Ok(lines)
    }

    /// Wait until the bot closes its side.
    pub async fn expect_eof(&mut self) -> anyhow::Result<()> {
        let mut line = String::new();
        let read = timeout(RECV_TIMEOUT, self.reader.read_line(&mut line)).await??;
        anyhow::ensure!(read == 0, "expected EOF, got {line:?}");
        Ok(())
    }
}
