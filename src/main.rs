mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::AppError, state::BotState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;

    let scheduler = startup::start_scheduler().await?;
    let state = Arc::new(BotState::new(config, scheduler));

    tracing::info!(
        "Managing role \"{}\", syncing every {}s",
        state.config.voice_role_name,
        state.config.sync_interval.as_secs()
    );

    bot::start::start_bot(state).await
}
