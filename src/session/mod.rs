//! Connection session.
//!
//! A [`Session`] owns the transport, the bot's configuration and the
//! dispatcher. It registers, joins the default channel, then reads lines
//! until the server goes away or a shutdown signal arrives. Every write goes
//! through the session, which keeps it the single writer on the wire.

mod state;

pub use state::SessionState;

use mentat_proto::{Command, LineCodec, ParsedMessage, Transport};
use std::future::Future;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::bot::Dispatcher;
use crate::config::Config;
use crate::error::{SessionError, SessionResult};

/// One bot connection to one server.
#[derive(Debug)]
pub struct Session<S = TcpStream> {
    config: Config,
    state: SessionState,
    current_channel: Option<String>,
    dispatcher: Dispatcher,
    transport: Option<Transport<S>>,
}

impl Session<TcpStream> {
    /// Open a TCP connection to the configured server.
    ///
    /// # Errors
    ///
    /// [`SessionError::Connect`] when the server cannot be reached. Nothing
    /// is retried.
    pub async fn connect(config: Config) -> SessionResult<Self> {
        let mut session = Session::new(config);
        session.transition(SessionState::Connecting)?;

        let addr = session.config.address();
        info!(addr = %addr, "Connecting");

        let target = (session.config.host.as_str(), session.config.port);
        let stream = match TcpStream::connect(target).await {
            Ok(stream) => stream,
            Err(source) => {
                session.transition(SessionState::Disconnected)?;
                return Err(SessionError::Connect { addr, source });
            }
        };

        session.attach(Transport::tcp(stream))?;
        info!(addr = %addr, "Connected");
        Ok(session)
    }
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// A disconnected session for `config`.
    pub fn new(config: Config) -> Self {
        let dispatcher = Dispatcher::new(config.owner.clone());
        Self {
            config,
            state: SessionState::Disconnected,
            current_channel: None,
            dispatcher,
            transport: None,
        }
    }

    /// Hand an already open transport to the session.
    pub fn attach(&mut self, transport: Transport<S>) -> SessionResult {
        if self.state == SessionState::Disconnected {
            self.transition(SessionState::Connecting)?;
        }
        self.transition(SessionState::Connected)?;
        self.transport = Some(transport);
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Configuration this session was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The channel joined at startup. `!join`/`!leave` never change it.
    pub fn current_channel(&self) -> Option<&str> {
        self.current_channel.as_deref()
    }

    /// Send `PASS` (if configured), `NICK` and `USER`.
    pub async fn register(&mut self) -> SessionResult {
        if self.state != SessionState::Connected {
            return Err(SessionError::NotConnected);
        }
        let commands = registration(&self.config);
        self.send_all(commands).await?;
        info!(nick = %self.config.nickname, "Registration sent");
        Ok(())
    }

    /// Join the default channel and make it the current channel.
    pub async fn join_default(&mut self) -> SessionResult {
        let channel = self.config.default_channel.clone();
        self.send_all([Command::join(channel.clone())]).await?;
        self.transition(SessionState::Joined)?;
        info!(channel = %channel, "Joined default channel");
        self.current_channel = Some(channel);
        Ok(())
    }

    /// Register, then join the default channel.
    pub async fn start(&mut self) -> SessionResult {
        self.register().await?;
        self.join_default().await
    }

    /// Process inbound lines until the link fails or `shutdown` fires.
    ///
    /// Returns `Ok(())` only on shutdown. The shutdown signal is polled
    /// ahead of every read. A closed shutdown channel counts as a signal.
    pub async fn run(&mut self, mut shutdown: broadcast::Receiver<()>) -> SessionResult {
        self.transition(SessionState::Listening)?;
        info!("Listening");

        loop {
            let transport = self.transport.as_mut().ok_or(SessionError::NotConnected)?;
            let line = tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    info!("Shutdown requested");
                    return Ok(());
                }
                line = transport.read_line() => line?,
            };
            self.handle_line(&line).await?;
        }
    }

    /// Parse one line, answer it, and write whatever it produced.
    pub async fn handle_line(&mut self, line: &str) -> SessionResult {
        let msg = match ParsedMessage::parse(line) {
            Ok(msg) => msg,
            Err(e) => {
                debug!(error = %e, line = %line, "Skipping unparseable line");
                return Ok(());
            }
        };
        debug!(
            origin = %msg.origin,
            verb = %msg.verb,
            target = msg.target.as_deref().unwrap_or(""),
            payload = %msg.payload,
            "Received message"
        );

        let replies: Vec<Command> = self
            .respond(&msg)?
            .into_iter()
            .filter(is_sendable)
            .collect();
        if !replies.is_empty() {
            self.send_all(replies).await?;
        }
        Ok(())
    }

    /// Outbound commands for one parsed message.
    ///
    /// Keepalive is answered here; chat goes to the dispatcher. A server
    /// `ERROR` ends the session.
    pub fn respond(&self, msg: &ParsedMessage) -> SessionResult<Vec<Command>> {
        if msg.is_verb("PING") {
            let token = msg
                .trailing
                .clone()
                .or_else(|| msg.target.clone())
                .unwrap_or_default();
            return Ok(vec![Command::Pong(token)]);
        }
        if msg.is_verb("ERROR") {
            let reason = msg.trailing.clone().unwrap_or_default();
            return Err(SessionError::ServerError(reason));
        }
        Ok(self.dispatcher.dispatch(msg))
    }

    /// Close the link and return to `Disconnected`.
    ///
    /// With a `reason`, a `QUIT` is sent first. Failures here are logged and
    /// otherwise ignored; the session ends up disconnected regardless.
    pub async fn disconnect(&mut self, reason: Option<&str>) {
        if let Some(mut transport) = self.transport.take() {
            if let Some(reason) = reason {
                let quit = Command::Quit(Some(reason.to_owned()));
                if let Err(e) = transport.write_command(quit).await {
                    warn!(error = %e, "Failed to send QUIT");
                }
            }
            if let Err(e) = transport.close().await {
                debug!(error = %e, "Transport close failed");
            }
        }
        if self.state != SessionState::Disconnected {
            self.state = SessionState::Disconnected;
            info!("Disconnected");
        }
        self.current_channel = None;
    }

    async fn send_all<I>(&mut self, commands: I) -> SessionResult
    where
        I: IntoIterator<Item = Command>,
    {
        let transport = self.transport.as_mut().ok_or(SessionError::NotConnected)?;
        transport.write_commands(commands).await?;
        Ok(())
    }

    fn transition(&mut self, to: SessionState) -> SessionResult {
        if !self.state.can_transition_to(to) {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        debug!(from = %self.state, to = %to, "Session state change");
        self.state = to;
        Ok(())
    }
}

/// Fire `shutdown` once `signal` resolves.
///
/// If the signal cannot be listened for, the sender is held forever so the
/// session keeps running instead of seeing a closed channel.
pub async fn relay_shutdown<F>(signal: F, shutdown: broadcast::Sender<()>)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            info!("Received shutdown signal");
            let _ = shutdown.send(());
        }
        Err(e) => {
            warn!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

/// Whether `command` passes outbound sanitizing. Replies echo user text, so
/// one that fails is dropped rather than failing the write.
fn is_sendable(command: &Command) -> bool {
    match LineCodec::sanitize(command.to_string()) {
        Ok(_) => true,
        Err(e) => {
            warn!(verb = command.verb(), error = %e, "Dropping unsendable reply");
            false
        }
    }
}

/// The registration burst for `config`, in wire order.
pub fn registration(config: &Config) -> Vec<Command> {
    let mut commands = Vec::with_capacity(3);
    if let Some(password) = &config.password {
        commands.push(Command::Pass(password.clone()));
    }
    commands.push(Command::Nick(config.nickname.clone()));
    commands.push(Command::User {
        identification: config.identification().to_owned(),
        host: config.host.clone(),
        real_name: config.realname.clone(),
    });
    commands
}
