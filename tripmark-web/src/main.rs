//! # TripMark Web Server
//!
//! Personal travel-spot bookkeeping: every user keeps their own list of
//! named places, filters them by city, and sees them on a map.
//!
//! ## Architecture
//!
//! The server is built with Axum and serves HTML directly:
//! - Session-based authentication with signed cookies
//! - SQLite storage, created and migrated on startup
//! - Per-user spot CRUD with ownership enforced in the service layer
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p tripmark-web
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tripmark_shared::db::migrations::{ensure_database_exists, run_migrations};
use tripmark_shared::db::pool::{close_pool, create_pool, DatabaseConfig};
use tripmark_web::app::{build_router, AppState};
use tripmark_web::config::{Config, DEFAULT_SESSION_SECRET};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tripmark_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("TripMark v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    if config.session.secret == DEFAULT_SESSION_SECRET {
        tracing::warn!("SESSION_SECRET is not set; session cookies use the development secret");
    }

    // Create the database file (and its directory) on first run
    ensure_database_exists(&config.database.url).await?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let state = AppState::new(pool.clone(), config.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutdown signal received, exiting...");
        })
        .await?;

    close_pool(pool).await;

    Ok(())
}
