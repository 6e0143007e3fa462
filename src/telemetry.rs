//! Logging setup and span constructors.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// Verbosity comes from `RUST_LOG` and defaults to `info`. Calling this
/// more than once is harmless; later calls are ignored.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .try_init();
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, info_span};

    /// Span covering one server connection.
    pub fn session(host: &str, nickname: &str) -> Span {
        info_span!("session", host = %host, nick = %nickname)
    }

    /// Span covering one owner command.
    pub fn command(name: &str, origin: &str, target: &str) -> Span {
        info_span!("command", name = %name, origin = %origin, target = %target)
    }
}
