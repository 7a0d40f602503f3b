//! Serenity-backed implementation of the Discord platform capabilities.
//!
//! Role listing, member listing and role changes go through Discord's REST API. Voice
//! channel occupancy and display names are read from Serenity's gateway cache, which is
//! populated once a guild's `guild_create` event has been received.

use std::collections::HashMap;
use std::sync::Arc;

use serenity::all::{
    Cache, ChannelId, ChannelType, Context, GuildId, Http, Member, RoleId, UserId,
};
use serenity::async_trait;

use crate::data::discord::{DiscordApi, NameCache};
use crate::model::discord::{GuildRole, VoiceChannelOccupants};

/// Maximum number of members to fetch per API request.
///
/// Discord's API supports up to 1000 members per request. Using the maximum
/// reduces the number of API calls needed for large guilds.
static MEMBERS_PER_REQUEST: u64 = 1000;

/// Audit log reason attached to every role change made by the bot.
static AUDIT_LOG_REASON: &str = "Voice channel presence sync";

/// Discord access through Serenity's HTTP client and gateway cache.
///
/// Cheap to clone: both fields are reference counted and shared with the running client.
#[derive(Clone)]
pub struct SerenityDiscordApi {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl SerenityDiscordApi {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }

    /// Creates an instance sharing the HTTP client and cache of an event's context.
    pub fn from_context(ctx: &Context) -> Self {
        Self::new(ctx.http.clone(), ctx.cache.clone())
    }

    /// Reads voice channel occupancy for a guild from the cache.
    ///
    /// Kept synchronous so the cache guard is never held across an await point.
    fn cached_voice_channel_occupants(&self, guild_id: GuildId) -> Vec<VoiceChannelOccupants> {
        let Some(guild) = self.cache.guild(guild_id) else {
            tracing::warn!(
                "Guild {} is not in cache, treating all voice channels as empty",
                guild_id
            );
            return Vec::new();
        };

        let occupants = group_voice_occupants(
            guild.channels.values().map(|channel| (channel.id, channel.kind)),
            guild
                .voice_states
                .values()
                .map(|state| (state.user_id, state.channel_id)),
        );

        occupants
    }
}

#[async_trait]
impl DiscordApi for SerenityDiscordApi {
    async fn get_roles(&self, guild_id: GuildId) -> Result<Vec<GuildRole>, serenity::Error> {
        let roles = self.http.get_guild_roles(guild_id).await?;

        Ok(roles.iter().map(GuildRole::from_role).collect())
    }

    /// Pages through the full member list and keeps the members holding the role.
    ///
    /// Requires the GUILD_MEMBERS privileged intent. Any failed page fails the whole query;
    /// a partial list is never returned.
    async fn get_members_with_role(
        &self,
        guild_id: GuildId,
        role_id: RoleId,
    ) -> Result<Vec<UserId>, serenity::Error> {
        let mut holders = Vec::new();
        let mut after: Option<u64> = None;
        let mut fetched_total = 0;

        loop {
            let members = self
                .http
                .get_guild_members(guild_id, Some(MEMBERS_PER_REQUEST), after)
                .await?;

            let fetched_count = members.len();
            fetched_total += fetched_count;

            // Set up pagination for next iteration
            after = members.last().map(|m| m.user.id.get());

            holders.extend(members_holding_role(&members, role_id));

            // If we got less than the maximum, we've reached the end
            if fetched_count < MEMBERS_PER_REQUEST as usize {
                break;
            }
        }

        tracing::debug!(
            "Scanned {} members of guild {}, {} hold role {}",
            fetched_total,
            guild_id,
            holders.len(),
            role_id
        );

        Ok(holders)
    }

    async fn get_voice_channel_occupants(&self, guild_id: GuildId) -> Vec<VoiceChannelOccupants> {
        self.cached_voice_channel_occupants(guild_id)
    }

    async fn add_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), serenity::Error> {
        self.http
            .add_member_role(guild_id, user_id, role_id, Some(AUDIT_LOG_REASON))
            .await
    }

    async fn remove_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), serenity::Error> {
        self.http
            .remove_member_role(guild_id, user_id, role_id, Some(AUDIT_LOG_REASON))
            .await
    }
}

impl NameCache for SerenityDiscordApi {
    fn role_name(&self, guild_id: GuildId, role_id: RoleId) -> Option<String> {
        let guild = self.cache.guild(guild_id)?;
        let name = guild.roles.get(&role_id).map(|role| role.name.clone());

        name
    }

    fn member_name(&self, guild_id: GuildId, user_id: UserId) -> Option<String> {
        let guild = self.cache.guild(guild_id)?;
        let name = guild
            .members
            .get(&user_id)
            .map(|member| member.user.name.clone());

        name
    }
}

/// Returns the IDs of the members that hold `role_id`.
pub(crate) fn members_holding_role(members: &[Member], role_id: RoleId) -> Vec<UserId> {
    members
        .iter()
        .filter(|member| member.roles.contains(&role_id))
        .map(|member| member.user.id)
        .collect()
}

/// Groups connected members by voice or stage channel.
///
/// Every voice and stage channel gets an entry, empty channels included. Text and other
/// channel kinds are skipped, as are voice states that point at no channel or at a channel
/// not in `channels`. Entries are ordered by channel ID.
///
/// # Arguments
/// - `channels` - `(channel ID, channel kind)` for every channel of the guild
/// - `voice_states` - `(member, connected channel)` for every voice state of the guild
pub(crate) fn group_voice_occupants<C, V>(channels: C, voice_states: V) -> Vec<VoiceChannelOccupants>
where
    C: IntoIterator<Item = (ChannelId, ChannelType)>,
    V: IntoIterator<Item = (UserId, Option<ChannelId>)>,
{
    let mut by_channel: HashMap<ChannelId, Vec<UserId>> = channels
        .into_iter()
        .filter(|(_, kind)| matches!(kind, ChannelType::Voice | ChannelType::Stage))
        .map(|(channel_id, _)| (channel_id, Vec::new()))
        .collect();

    for (user_id, channel_id) in voice_states {
        let Some(channel_id) = channel_id else {
            continue;
        };

        if let Some(members) = by_channel.get_mut(&channel_id) {
            members.push(user_id);
        }
    }

    let mut occupants: Vec<VoiceChannelOccupants> = by_channel
        .into_iter()
        .map(|(channel_id, members)| VoiceChannelOccupants {
            channel_id,
            members,
        })
        .collect();
    occupants.sort_by_key(|o| o.channel_id);

    occupants
}
