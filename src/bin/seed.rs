// src/bin/seed.rs

//! Loads the demo data set into the configured database.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use assistant_backend::{
    config::{AppState, Config},
    seed,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let app_state = AppState::new(Config::from_env()?).await?;

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .context("failed to run database migrations")?;

    if seed::seed(&app_state).await? {
        tracing::info!("✅ Seed data created");
    } else {
        tracing::info!("Seed data already present, nothing to do");
    }

    Ok(())
}
