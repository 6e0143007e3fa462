//! mentat - minimal IRC bot.

use mentat::config::{Config, validate};
use mentat::telemetry::{self, spans};
use mentat::Session;
use mentat::session::relay_shutdown;
use tokio::sync::broadcast;
use tracing::{Instrument, error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "login.txt".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(path = %config_path, "Config error: {}", e);
        }
        anyhow::bail!("refusing to start with {} config error(s)", errors.len());
    }

    info!(
        addr = %config.address(),
        nick = %config.nickname,
        owner = %config.owner,
        channel = %config.default_channel,
        "Starting mentat"
    );

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(relay_shutdown(tokio::signal::ctrl_c(), shutdown_tx));

    let span = spans::session(&config.host, &config.nickname);
    let mut session = Session::connect(config)
        .instrument(span.clone())
        .await
        .map_err(|e| {
            error!(parent: &span, error = %e, "Connection failed");
            e
        })?;

    let result = async {
        session.start().await?;
        session.run(shutdown_rx).await
    }
    .instrument(span.clone())
    .await;

    match &result {
        Ok(()) => session.disconnect(Some("Shutting down")).instrument(span).await,
        Err(e) => {
            error!(parent: &span, error = %e, code = e.error_code(), "Session ended");
            session.disconnect(None).instrument(span).await;
        }
    }

    Ok(result?)
}
