//! Discord platform capabilities consumed by the voice role service.
//!
//! The service never talks to Serenity directly. It receives a `DiscordApi` for REST and
//! gateway-cache reads/writes and, optionally, a `NameCache` for turning IDs into display
//! names in log records. `SerenityDiscordApi` implements both for the running bot; tests
//! substitute in-memory fakes.

pub mod serenity_api;

#[cfg(test)]
pub mod mock;

pub use serenity_api::SerenityDiscordApi;

use serenity::all::{GuildId, RoleId, UserId};
use serenity::async_trait;

use crate::model::discord::{GuildRole, VoiceChannelOccupants};

/// Discord operations needed to keep the managed role in sync with voice presence.
///
/// All methods are scoped to a single guild. Fallible methods return the platform's error
/// unchanged; the service layer wraps it with context.
#[async_trait]
pub trait DiscordApi: Send + Sync {
    /// Lists every role in the guild, in the order Discord returns them.
    async fn get_roles(&self, guild_id: GuildId) -> Result<Vec<GuildRole>, serenity::Error>;

    /// Lists the members of the guild that currently hold `role_id`.
    async fn get_members_with_role(
        &self,
        guild_id: GuildId,
        role_id: RoleId,
    ) -> Result<Vec<UserId>, serenity::Error>;

    /// Lists the current occupants of each voice and stage channel of the guild.
    async fn get_voice_channel_occupants(&self, guild_id: GuildId) -> Vec<VoiceChannelOccupants>;

    /// Grants `role_id` to a member. Granting a role the member already holds succeeds.
    async fn add_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), serenity::Error>;

    /// Revokes `role_id` from a member. Revoking a role the member does not hold succeeds.
    async fn remove_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), serenity::Error>;
}

/// Best-effort lookup of display names from a local cache.
///
/// A missing entry is not an error; callers fall back to a placeholder.
pub trait NameCache: Send + Sync {
    fn role_name(&self, guild_id: GuildId, role_id: RoleId) -> Option<String>;

    fn member_name(&self, guild_id: GuildId, user_id: UserId) -> Option<String>;
}
