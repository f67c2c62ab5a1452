use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use carhire_web::cache::start_cache_warmer;
use carhire_web::config::Config;
use carhire_web::{routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("carhire_web=debug,tower_http=info")),
        )
        .init();

    info!("Loading configuration...");
    let config = Config::from_env()?;
    let address = config.bind_address();

    let state = AppState::new(config).context("Failed to build rental API client")?;
    info!("Rental API at {}", state.api.base_url());

    if state.config.cache_warmer {
        tokio::spawn(start_cache_warmer(state.cache.clone(), state.api.clone()));
    }

    let app = routes::router(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install terminate handler: {}", e);
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
}
