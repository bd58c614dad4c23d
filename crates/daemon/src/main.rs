//! Waitline - Main Entry Point
//! Queue engine with HTTP API + background advancer

mod config;

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{DaemonConfig, LogFormat, DEFAULT_LOG_FILTER};
use waitline_api_http::{AppState, HttpServer};
use waitline_core::application::{shutdown_channel, QueueAdvancer, QueueService};
use waitline_core::port::id_provider::UuidProvider;
use waitline_core::port::random_source::ThreadRandomSource;
use waitline_core::port::time_provider::SystemTimeProvider;
use waitline_core::port::QueueStore;
use waitline_infra_memory::InMemoryQueueStore;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_logging(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .context("Failed to create env filter")?;

    match format {
        LogFormat::Json => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        LogFormat::Pretty => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }
    Ok(())
}

/// Resolves on Ctrl+C or (on unix) SIGTERM
async fn shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm =
            signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res.context("Failed to listen for Ctrl+C")?,
            _ = sigterm.recv() => {}
        }
    }

    #[cfg(not(unix))]
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration (abort on malformed values)
    let config = DaemonConfig::from_env()?;

    // 2. Initialize logging
    init_logging(config.log_format)?;

    info!("Waitline v{} starting...", VERSION);
    info!(
        host = %config.http.host,
        port = config.http.port,
        advance_interval_ms = config.advance_interval.as_millis() as u64,
        serve_probability = config.serve_probability,
        seed_min = *config.seed.range().start(),
        seed_max = *config.seed.range().end(),
        party_size_policy = ?config.party_size_policy,
        "Configuration loaded"
    );

    // 3. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let random = Arc::new(ThreadRandomSource);
    let store: Arc<dyn QueueStore> = Arc::new(InMemoryQueueStore::new(
        config.seed,
        random.clone(),
        Arc::new(UuidProvider),
        time_provider.clone(),
    ));

    let service = Arc::new(
        QueueService::new(store.clone(), time_provider)
            .with_party_size_policy(config.party_size_policy),
    );

    let (shutdown_tx, shutdown_rx) = shutdown_channel();

    // 4. Start queue advancer
    let advancer = QueueAdvancer::new(store.clone(), random)
        .with_interval(config.advance_interval)
        .with_serve_probability(config.serve_probability);

    let advancer_token = shutdown_rx.clone();
    let advancer_handle = tokio::spawn(async move {
        if let Err(e) = advancer.run(advancer_token).await {
            error!(error = ?e, "Queue advancer failed");
        }
    });

    // 5. Start HTTP server
    let server = HttpServer::bind(&config.http, AppState::new(service, store))
        .await
        .with_context(|| {
            format!(
                "Failed to bind HTTP server on {}:{}",
                config.http.host, config.http.port
            )
        })?;
    let server_handle = tokio::spawn(server.run(shutdown_rx));

    info!("System ready. Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    shutdown_signal().await?;
    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown
    shutdown_tx.shutdown();

    match tokio::time::timeout(Duration::from_secs(5), server_handle).await {
        Ok(Ok(Err(e))) => error!(error = ?e, "HTTP server error during shutdown"),
        Ok(Err(e)) => error!(error = ?e, "HTTP server task panicked"),
        Err(_) => error!("HTTP server did not stop within 5s"),
        Ok(Ok(Ok(()))) => {}
    }
    let _ = tokio::time::timeout(Duration::from_secs(5), advancer_handle).await;

    info!("Shutdown complete.");

    Ok(())
}
