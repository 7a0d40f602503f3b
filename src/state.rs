//! Bot state shared across all event handlers and scheduled jobs.
//!
//! This module defines the `BotState` struct which holds the configuration, the per-guild
//! registry and the job scheduler. The state is initialized once during startup, wrapped in
//! an `Arc` and handed to the Serenity event handler, which passes clones to every sync job
//! it schedules.

use std::sync::Arc;

use dashmap::{DashMap, DashSet};
use serenity::all::GuildId;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio_cron_scheduler::JobScheduler;

use crate::config::Config;

/// Per-guild runtime bookkeeping.
///
/// Owns one mutual-exclusion lock per guild, serializing every read-then-write of the
/// managed role's membership within that guild: voice event toggles and reconciliation
/// passes. Guilds never contend with each other. Also remembers which guilds already have
/// a sync job so a repeated `guild_create` does not schedule a second one.
#[derive(Default)]
pub struct GuildRegistry {
    locks: DashMap<GuildId, Arc<Mutex<()>>>,
    scheduled: DashSet<GuildId>,
}

impl GuildRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to a guild's role state.
    ///
    /// The lock is released when the returned guard is dropped, including during unwinding.
    /// The guard is owned, so it does not borrow the registry's internal map.
    pub async fn lock(&self, guild_id: GuildId) -> OwnedMutexGuard<()> {
        let lock = self.locks.entry(guild_id).or_default().value().clone();

        lock.lock_owned().await
    }

    /// Records that a sync job exists for the guild.
    ///
    /// # Returns
    /// - `true` - The guild was not scheduled before and the caller should schedule it
    /// - `false` - A sync job was already registered for the guild
    pub fn mark_scheduled(&self, guild_id: GuildId) -> bool {
        self.scheduled.insert(guild_id)
    }

    /// Forgets a guild's scheduled state, used when registering its job failed.
    pub fn unmark_scheduled(&self, guild_id: GuildId) {
        self.scheduled.remove(&guild_id);
    }
}

/// Shared state for the bot's event handler and scheduler jobs.
pub struct BotState {
    pub config: Config,
    pub guilds: GuildRegistry,
    /// Running job scheduler that per-guild sync jobs are added to.
    ///
    /// `JobScheduler` is a cheap handle; clones share the same running scheduler.
    pub scheduler: JobScheduler,
}

impl BotState {
    pub fn new(config: Config, scheduler: JobScheduler) -> Self {
        Self {
            config,
            guilds: GuildRegistry::new(),
            scheduler,
        }
    }
}
