use anyhow::{Context, Result};
use pc_core::config::AppConfig;
use pc_server::{app_with_state, state::AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;
    let state = AppState::from_config(&config).context("initializing application state")?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(
        %addr,
        upload_dir = %config.server.upload_dir.display(),
        online = config.search.is_configured(),
        "plagiarism checker listening"
    );
    axum::serve(listener, app_with_state(state))
        .await
        .context("serving HTTP")?;
    Ok(())
}
