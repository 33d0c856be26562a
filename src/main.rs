use anyhow::Context;

use ciel_blog::app::{self, MongoStore};
use ciel_blog::config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ciel_blog=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting CIEL blog API server...");

    let settings = Settings::from_env().context("Failed to load settings")?;

    // Connect to MongoDB
    let store = MongoStore::connect(&settings)
        .await
        .context("Failed to connect to MongoDB")?;
    tracing::info!("Connected to MongoDB database '{}'", settings.db_name);

    store
        .ensure_indexes()
        .await
        .context("Failed to create MongoDB indexes")?;

    if settings.seed_on_startup {
        let outcome = store.seed().await.context("Failed to seed demo data")?;
        tracing::info!("Seeding outcome: {:?}", outcome);
    }

    let router = app::router(store.state());

    // Start the server
    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Server stopped, closing MongoDB connections");
    store.shutdown().await;

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
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

    tracing::info!("Shutdown signal received");
}
