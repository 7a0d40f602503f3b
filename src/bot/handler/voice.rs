//! Voice state event handler that toggles the voice role on join and leave.

use serenity::all::{Context, VoiceState};

use crate::data::discord::SerenityDiscordApi;
use crate::model::discord::VoiceTransition;
use crate::service::VoiceRoleService;
use crate::state::BotState;

/// Handles the voice_state_update event for a single member.
///
/// Joining any voice channel grants the voice role and disconnecting revokes it. Channel
/// moves and mute/deafen changes are ignored. Updates outside a guild are ignored.
///
/// Errors are logged and dropped so one failed toggle never affects later events.
///
/// # Arguments
/// - `state` - Shared bot state holding the configuration and guild registry
/// - `ctx` - Discord context for API requests and cache reads
/// - `old` - Member's previous voice state, if it was cached
/// - `new` - Member's new voice state
pub async fn handle_voice_state_update(
    state: &BotState,
    ctx: Context,
    old: Option<VoiceState>,
    new: VoiceState,
) {
    let Some(guild_id) = new.guild_id else {
        return;
    };

    let old_channel = old.and_then(|previous| previous.channel_id);
    let transition = VoiceTransition::from_channels(old_channel, new.channel_id);

    tracing::debug!(
        "Voice state update for {} in guild {}: {:?}",
        new.user_id,
        guild_id,
        transition
    );

    let api = SerenityDiscordApi::from_context(&ctx);
    let service =
        VoiceRoleService::new(&api, &state.guilds, &state.config.voice_role_name).with_names(&api);

    if let Err(e) = service
        .handle_voice_transition(guild_id, new.user_id, transition)
        .await
    {
        tracing::error!(
            "Failed to update voice role for {} in guild {}: {}",
            new.user_id,
            guild_id,
            e
        );
    }
}
