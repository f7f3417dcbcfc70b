use anyhow::Result;
use clap::Parser;
use doddns::reconcile::REQUEST_TIMEOUT;
use doddns::{Config, DigitalOceanStore, DynRecordStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_init();

    let config = Arc::new(Config::parse().finalize()?);
    let store: DynRecordStore = Arc::new(DigitalOceanStore::new(
        &config.digitalocean_api_token,
        REQUEST_TIMEOUT,
    )?);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = doddns::new_http(config.clone(), store, async {
        shutdown_rx.await.ok();
    });

    tracing::info!("listening on {}{}", config.address, config.endpoint);
    let mut server_handle = tokio::spawn(server);

    let mut hangup = signal(SignalKind::hangup())?;
    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = &mut server_handle => {
            result??;
            return Ok(());
        }
        _ = tokio::signal::ctrl_c() => tracing::info!("shutting down on SIGINT"),
        _ = hangup.recv() => tracing::info!("shutting down on SIGHUP"),
        _ = terminate.recv() => tracing::info!("shutting down on SIGTERM"),
    }

    // Drain in-flight requests, but not for longer than the deadline.
    let _ = shutdown_tx.send(());
    match tokio::time::timeout(SHUTDOWN_TIMEOUT, &mut server_handle).await {
        Ok(result) => result??,
        Err(_) => {
            server_handle.abort();
            tracing::warn!("graceful shutdown deadline exceeded");
        }
    }

    tracing::info!("goodbye");
    Ok(())
}

fn tracing_init() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doddns=info,tower_http=info".into()),
        )
        .init();
}
