//! Guild event handler that starts periodic voice role syncing.
//!
//! The `guild_create` event fires when a guild becomes available to the bot:
//! - On bot startup for each guild the bot is already in
//! - When the bot joins a new guild
//! - When a guild becomes available after a Discord outage or reconnect
//!
//! By the time it fires, Serenity has cached the guild's channels, roles and voice states,
//! so the reconciler can compute voice presence. Each guild gets exactly one repeating sync
//! job per process; later `guild_create` events for the same guild are no-ops.

use std::sync::Arc;

use serenity::all::{Context, Guild};

use crate::data::discord::SerenityDiscordApi;
use crate::scheduler::voice_sync;
use crate::state::BotState;

/// Handles the guild_create event by scheduling the guild's voice role sync.
///
/// # Arguments
/// - `state` - Shared bot state holding the scheduler and guild registry
/// - `ctx` - Discord context providing the HTTP client and cache for the sync job
/// - `guild` - Guild data from Discord
/// - `_is_new` - Whether this is a new guild join (unused, required by event handler signature)
pub async fn handle_guild_create(
    state: &Arc<BotState>,
    ctx: Context,
    guild: Guild,
    _is_new: Option<bool>,
) {
    tracing::debug!(
        "Guild create event: {} ({}) - channels: {}, voice states: {}",
        guild.name,
        guild.id,
        guild.channels.len(),
        guild.voice_states.len()
    );

    let api = SerenityDiscordApi::from_context(&ctx);

    match voice_sync::schedule_guild_sync(state.clone(), api, guild.id).await {
        Ok(true) => {
            tracing::info!(
                "Scheduled voice role sync for guild {} ({}) every {}s",
                guild.name,
                guild.id,
                state.config.sync_interval.as_secs()
            );
        }
        Ok(false) => {
            tracing::debug!("Voice role sync already scheduled for guild {}", guild.id);
        }
        Err(e) => {
            tracing::error!(
                "Failed to schedule voice role sync for guild {} ({}): {}",
                guild.name,
                guild.id,
                e
            );
        }
    }
}
