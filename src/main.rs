//! CrowdDrive Event Cache - Binary Entry Point
//!
//! Loads configuration, opens the store, starts the maintenance triggers
//! and serves the HTTP API until Ctrl+C or SIGTERM.

use std::sync::Arc;

use crowddrive::api::{create_router, AppState};
use crowddrive::config::AppConfig;
use crowddrive::provider::AnthropicProvider;
use crowddrive::store::EventStore;
use crowddrive::{scheduler, CacheError, EventCache};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,crowddrive=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // A missing .env file is normal in production.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = config.socket_addr()?;

    let store = EventStore::open(&config.store).await?;
    info!(path = %config.store.path.display(), "event store ready");

    let provider = Arc::new(AnthropicProvider::new(&config.provider)?);
    let cache = EventCache::new(store.clone(), provider, config.provider.city.clone());

    let triggers = if config.scheduler_enabled {
        scheduler::spawn_all(&cache)
    } else {
        info!("scheduler disabled");
        Vec::new()
    };

    let app = create_router(Arc::new(AppState::new(cache)));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| CacheError::Config(format!("cannot bind {}: {}", addr, e)))?;
    info!(%addr, "CrowdDrive backend listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    for handle in triggers {
        handle.abort();
    }
    store.close().await;
    Ok(())
}
