use std::sync::Arc;

use serenity::all::{Client, GatewayIntents};

use crate::bot::handler::Handler;
use crate::error::AppError;
use crate::state::BotState;

/// Starts the Discord bot and runs it until the gateway connection ends.
///
/// The bot requires a DISCORD_BOT_TOKEN environment variable to be set.
///
/// # Arguments
/// - `state` - Shared bot state passed to the event handler
///
/// # Returns
/// - `Ok(())` if the bot shuts down cleanly
/// - `Err(AppError)` if bot initialization or connection fails
pub async fn start_bot(state: Arc<BotState>) -> Result<(), AppError> {
    // Configure gateway intents - what events the bot will receive
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_VOICE_STATES;

    let handler = Handler::new(state.clone());

    let mut client = Client::builder(&state.config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    tracing::info!("Starting Discord bot...");

    // Start the bot (this blocks until shutdown)
    client.start().await?;

    Ok(())
}
