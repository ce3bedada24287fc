//! Composition root: settings, logging, store, routes.
//!
//! Run from repo root: `cargo run -p contacts-server`

use contacts_api::{app, connect, ensure_resource_tables, load_from_file, resolve, AppState, FullConfig, Settings};
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("contacts_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let config = match &settings.resources_path {
        Some(path) => load_from_file(path).await?,
        None => FullConfig::contacts(),
    };
    let model = resolve(&config)?;

    let pool = connect(&settings.database_url).await?;
    ensure_resource_tables(&pool, &model).await?;
    let state = AppState::new(pool.clone(), model);

    let router = app(state, &settings);
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        environment = %settings.environment,
        addr = %listener.local_addr()?,
        "listening"
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    pool.close().await;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
