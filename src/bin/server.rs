use std::sync::Arc;

use anyhow::Context;
use trivia_api::config::Settings;
use trivia_api::db;
use trivia_api::quiz::ThreadRngPicker;
use trivia_api::server::app::{run_server, AppState};
use trivia_api::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let settings = Settings::load().context("Failed to load settings")?;
    tracing::info!(profile = ?settings.profile, "Starting trivia api");

    let pool = db::establish_connection(settings.database_url())
        .await
        .context("Cannot connect to DB")?;
    if settings.run_migrations {
        tracing::info!("Running db migrations...");
        db::run_migrations(&pool).await?;
    }

    let state = AppState::new(pool, Arc::new(ThreadRngPicker));
    run_server(state, &settings.listen_addr).await
}
