//! Interactive ordering kiosk on the terminal.
//!
//! Reads commands from stdin and renders screens to stdout. Logs go to stderr.

use kiosk::{
    Catalog, KioskConfig, KioskTerminal, LineOutcome, LoggingSubmitter, SessionEnvironment,
    SessionReducer, SessionState, SessionStore,
};
use kiosk_core::environment::SystemClock;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = KioskConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    kiosk::describe_metrics();

    info!(
        title = %config.title,
        clear_cart_on_checkout = config.clear_cart_on_checkout,
        checkout_timeout = ?config.checkout_timeout,
        "Configuration loaded"
    );

    let catalog = Arc::new(Catalog::standard());
    let env = SessionEnvironment::new(
        Arc::clone(&catalog),
        Arc::new(SystemClock),
        Arc::new(LoggingSubmitter::new(config.cart_disposition())),
    )
    .with_checkout_timeout(config.checkout_timeout);
    let store: SessionStore = SessionStore::new(SessionState::new(), SessionReducer::new(), env);

    let shutdown_timeout = config.shutdown_timeout;
    let terminal = KioskTerminal::new(store.clone(), catalog, config);

    let mut stdout = tokio::io::stdout();
    stdout.write_all(terminal.welcome().await.as_bytes()).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match terminal.handle_line(&line).await {
            LineOutcome::Continue(reply) => stdout.write_all(reply.as_bytes()).await?,
            LineOutcome::Quit => break,
        }
    }

    info!("Shutting down");
    if let Err(e) = store.shutdown(shutdown_timeout).await {
        warn!(error = %e, "Shutdown did not complete cleanly");
    }

    stdout.write_all(b"Thank you, goodbye!\n").await?;
    stdout.flush().await?;
    Ok(())
}
