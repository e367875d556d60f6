use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use nailsure::config::AppConfig;
use nailsure::handlers;
use nailsure::services::mail::log::LogMailer;
use nailsure::state::AppState;
use nailsure::store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    anyhow::ensure!(
        !config.admin_access_code.trim().is_empty(),
        "ADMIN_ACCESS_CODE must not be empty"
    );
    if config.uses_default_access_code() {
        tracing::warn!("ADMIN_ACCESS_CODE not set, using the built-in default access code");
    }

    let stores = store::open(&config)?;
    let mailer = LogMailer::new(config.smtp.clone(), config.owner_email.clone());
    let state = Arc::new(AppState::new(config.clone(), stores, Box::new(mailer)));

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
