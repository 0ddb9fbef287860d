//! # ClarityVault API Server
//!
//! Loads configuration, connects to PostgreSQL, applies migrations, wires
//! the Gemini and YouTube clients and serves the HTTP API until Ctrl-C or
//! SIGTERM.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p clarityvault-api
//! ```

use std::sync::Arc;

use anyhow::Context;
use clarityvault_api::{
    app::{build_router, AppState},
    config::{Config, LogFormat},
};
use clarityvault_genai::{
    gemini::{GeminiClient, GeminiConfig},
    youtube::YouTubeClient,
};
use clarityvault_shared::{
    db::{
        migrations::{ensure_database_exists, run_migrations},
        pool::{close_pool, create_pool, PoolSettings},
    },
    store::postgres::{PgFileStore, PgUserStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "clarityvault_api=debug,clarityvault_genai=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    init_tracing(config.logging.format);

    tracing::info!(
        "ClarityVault API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    if !config.api.production {
        ensure_database_exists(&config.database.url)
            .await
            .context("failed to create the development database")?;
    }

    let pool = create_pool(&PoolSettings {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..PoolSettings::default()
    })
    .await
    .context("failed to connect to the database")?;

    run_migrations(&pool).await.context("failed to run migrations")?;

    let gemini = GeminiClient::new(
        GeminiConfig::new(config.gemini.api_key.clone())
            .with_base_url(config.gemini.base_url.clone())
            .with_model(config.gemini.model.clone())
            .with_timeout(config.outbound_timeout()),
    )?;
    let youtube = YouTubeClient::new(
        config.youtube.api_key.clone(),
        config.youtube.base_url.clone(),
        config.outbound_timeout(),
    )?;

    let bind_address = config.bind_address();
    let state = AppState::new(
        config,
        Arc::new(PgUserStore::new(pool.clone())),
        Arc::new(PgFileStore::new(pool.clone())),
        Arc::new(gemini),
        Arc::new(youtube),
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;
    tracing::info!("Shutdown complete");

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => tracing::error!(error = %err, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}
