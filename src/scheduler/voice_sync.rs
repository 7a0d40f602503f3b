use std::sync::Arc;

use serenity::all::GuildId;
use tokio_cron_scheduler::Job;

use crate::{
    data::discord::{DiscordApi, NameCache},
    error::AppError,
    service::VoiceRoleService,
    state::BotState,
};

/// Schedules the repeating voice role sync for a guild.
///
/// The job runs every `sync_interval` from the configuration, first firing one interval
/// after scheduling. A guild is scheduled at most once; a repeated call for the same guild
/// does nothing.
///
/// # Arguments
/// - `state` - Shared bot state; its scheduler receives the job
/// - `api` - Discord access used by every run of the job
/// - `guild_id` - Guild to keep in sync
///
/// # Returns
/// - `Ok(true)` - A new job was registered
/// - `Ok(false)` - The guild already had a job
/// - `Err(AppError::SchedulerErr)` - Creating or registering the job failed
pub async fn schedule_guild_sync<A>(
    state: Arc<BotState>,
    api: A,
    guild_id: GuildId,
) -> Result<bool, AppError>
where
    A: DiscordApi + NameCache + 'static,
{
    if !state.guilds.mark_scheduled(guild_id) {
        return Ok(false);
    }

    // Clone resources for the job
    let job_state = state.clone();
    let job_api = Arc::new(api);

    let job = Job::new_repeated_async(state.config.sync_interval, move |_uuid, _lock| {
        let state = job_state.clone();
        let api = job_api.clone();

        Box::pin(async move {
            run_guild_sync(&state, api.as_ref(), guild_id).await;
        })
    });

    let result = match job {
        Ok(job) => state.scheduler.add(job).await.map(|_| ()),
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        state.guilds.unmark_scheduled(guild_id);
        return Err(e.into());
    }

    Ok(true)
}

/// Runs one voice role reconciliation pass for a guild and logs the outcome.
///
/// Never returns an error: a failed pass is logged and the next tick retries.
pub async fn run_guild_sync<A>(state: &BotState, api: &A, guild_id: GuildId)
where
    A: DiscordApi + NameCache,
{
    tracing::debug!("Voice role sync tick for guild {}", guild_id);

    let service =
        VoiceRoleService::new(api, &state.guilds, &state.config.voice_role_name).with_names(api);

    match service.sync_voice_roles(guild_id).await {
        Ok(report) => {
            if report.attempted() > 0 {
                tracing::info!(
                    "Voice role sync for guild {}: {} added, {} removed, {} failed",
                    guild_id,
                    report.added.len(),
                    report.removed.len(),
                    report.failed.len()
                );
            }

            if !report.failed.is_empty() {
                tracing::warn!(
                    "Voice role sync for guild {} left {} members out of sync: {}",
                    guild_id,
                    report.failed.len(),
                    service.member_list(guild_id, &report.failed)
                );
            }
        }
        Err(e) => {
            tracing::error!("Failed to sync voice roles for guild {}: {}", guild_id, e);
        }
    }
}
