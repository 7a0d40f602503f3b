//! Voice role resolution, toggling and reconciliation.
//!
//! Two paths change the managed role:
//! - Voice state events toggle the role for the single member that joined or left
//! - A periodic reconciliation pass diffs role holders against voice channel occupants
//!   and corrects every discrepancy
//!
//! Both paths hold the guild's lock from `GuildRegistry` for their full duration, so a pass
//! never reads role holders while an event toggle for the same guild is half done.

use serenity::all::{GuildId, RoleId, UserId};

use crate::{
    data::discord::{DiscordApi, NameCache},
    error::voice_role::VoiceRoleError,
    model::{
        discord::{GuildRole, VoiceTransition},
        member_set::MemberSet,
    },
    state::GuildRegistry,
};

/// Placeholder logged when a role or member name is not in the local cache.
pub const UNKNOWN_NAME: &str = "<unknown>";

/// Placeholder logged for an empty member list.
const NO_MEMBERS: &str = "<none>";

/// Outcome of one reconciliation pass.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SyncReport {
    /// Members that were in a call without the role and received it.
    pub added: MemberSet<UserId>,
    /// Members that held the role outside of any call and lost it.
    pub removed: MemberSet<UserId>,
    /// Members whose toggle failed; they are retried on the next pass.
    pub failed: MemberSet<UserId>,
}

impl SyncReport {
    /// Number of toggles attempted during the pass.
    pub fn attempted(&self) -> usize {
        self.added.len() + self.removed.len() + self.failed.len()
    }
}

pub struct VoiceRoleService<'a> {
    api: &'a dyn DiscordApi,
    names: Option<&'a dyn NameCache>,
    guilds: &'a GuildRegistry,
    role_name: &'a str,
}

impl<'a> VoiceRoleService<'a> {
    /// Creates a service managing the role named `role_name`.
    ///
    /// # Arguments
    /// - `api` - Discord operations used to read and change role state
    /// - `guilds` - Registry providing the per-guild lock
    /// - `role_name` - Exact, case-sensitive name of the managed role
    pub fn new(api: &'a dyn DiscordApi, guilds: &'a GuildRegistry, role_name: &'a str) -> Self {
        Self {
            api,
            names: None,
            guilds,
            role_name,
        }
    }

    /// Resolves display names for log records through `names`.
    pub fn with_names(mut self, names: &'a dyn NameCache) -> Self {
        self.names = Some(names);
        self
    }

    /// Finds a guild role by exact name.
    ///
    /// Queries Discord on every call. Matching is case-sensitive and exact. If several roles
    /// share the name, the first one in Discord's order is returned and a warning is logged.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to search
    /// - `name` - Role name to match exactly
    ///
    /// # Returns
    /// - `Ok(GuildRole)` - First role with the given name
    /// - `Err(VoiceRoleError::RoleLookupFailed)` - Listing the guild's roles failed
    /// - `Err(VoiceRoleError::RoleNotFound)` - No role has the given name
    pub async fn find_role(
        &self,
        guild_id: GuildId,
        name: &str,
    ) -> Result<GuildRole, VoiceRoleError> {
        let roles = self
            .api
            .get_roles(guild_id)
            .await
            .map_err(|e| VoiceRoleError::RoleLookupFailed {
                guild_id,
                source: Box::new(e),
            })?;

        let mut matching = roles.into_iter().filter(|role| role.name == name);

        let Some(role) = matching.next() else {
            return Err(VoiceRoleError::RoleNotFound {
                guild_id,
                name: name.to_string(),
            });
        };

        let duplicates = matching.count();
        if duplicates > 0 {
            tracing::warn!(
                "Guild {} has {} roles named \"{}\", using role {}",
                guild_id,
                duplicates + 1,
                name,
                role.id
            );
        }

        Ok(role)
    }

    /// Grants or revokes a role for a single member.
    ///
    /// Idempotent: granting a held role or revoking an unheld one succeeds. Role and member
    /// names for the log record come from the name cache when one is configured and fall
    /// back to `<unknown>`; name resolution never fails the toggle.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the member belongs to
    /// - `user_id` - Member to change
    /// - `role_id` - Role to grant or revoke
    /// - `enable` - `true` to grant the role, `false` to revoke it
    ///
    /// # Returns
    /// - `Ok(())` - Discord accepted the change
    /// - `Err(VoiceRoleError::RoleToggleFailed)` - The add or remove request failed
    pub async fn toggle_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        enable: bool,
    ) -> Result<(), VoiceRoleError> {
        let role_name = self.role_display_name(guild_id, role_id);
        let user_name = self.member_display_name(guild_id, user_id);

        let result = if enable {
            self.api.add_member_role(guild_id, user_id, role_id).await
        } else {
            self.api.remove_member_role(guild_id, user_id, role_id).await
        };

        result.map_err(|e| VoiceRoleError::RoleToggleFailed {
            role: role_name.clone(),
            user_id,
            enable,
            source: Box::new(e),
        })?;

        tracing::info!(
            "Role toggle: role {} user {} ({}) enable={} in guild {}",
            role_name,
            user_name,
            user_id,
            enable,
            guild_id
        );

        Ok(())
    }

    /// Gets the set of members currently holding `role`.
    ///
    /// # Returns
    /// - `Ok(MemberSet)` - IDs of every member holding the role
    /// - `Err(VoiceRoleError::MembershipQueryFailed)` - The member query failed
    pub async fn members_with_role(
        &self,
        guild_id: GuildId,
        role: &GuildRole,
    ) -> Result<MemberSet<UserId>, VoiceRoleError> {
        let holders = self
            .api
            .get_members_with_role(guild_id, role.id)
            .await
            .map_err(|e| VoiceRoleError::MembershipQueryFailed {
                guild_id,
                role: role.name.clone(),
                source: Box::new(e),
            })?;

        Ok(holders.into_iter().collect())
    }

    /// Gets the set of members connected to any voice or stage channel of the guild.
    pub async fn members_in_call(&self, guild_id: GuildId) -> MemberSet<UserId> {
        let mut in_call = MemberSet::new();

        for channel in self.api.get_voice_channel_occupants(guild_id).await {
            in_call.union(&channel.members.into_iter().collect());
        }

        in_call
    }

    /// Formats a member set as a sorted, comma-separated list of display names for logging.
    ///
    /// Members missing from the name cache appear as `<unknown>`; an empty set is `<none>`.
    pub fn member_list(&self, guild_id: GuildId, members: &MemberSet<UserId>) -> String {
        if members.is_empty() {
            return NO_MEMBERS.to_string();
        }

        let mut names: Vec<String> = members
            .iter()
            .map(|user_id| self.member_display_name(guild_id, *user_id))
            .collect();
        names.sort();

        names.join(", ")
    }

    /// Applies a single member's voice state change to the managed role.
    ///
    /// Joining a voice channel grants the role and leaving voice revokes it. Moving between
    /// channels or toggling mute/deafen leaves the role alone. The guild's lock is held
    /// from the role lookup through the toggle.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the voice state belongs to
    /// - `user_id` - Member whose voice state changed
    /// - `transition` - Classified voice state change
    ///
    /// # Returns
    /// - `Ok(())` - Role updated, or no change required
    /// - `Err(VoiceRoleError)` - Role lookup or toggle failed
    pub async fn handle_voice_transition(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        transition: VoiceTransition,
    ) -> Result<(), VoiceRoleError> {
        let Some(enable) = transition.desired_role_state() else {
            tracing::trace!(
                "Ignoring {:?} voice update for {} in guild {}",
                transition,
                user_id,
                guild_id
            );
            return Ok(());
        };

        let _guard = self.guilds.lock(guild_id).await;

        let role = self.find_role(guild_id, self.role_name).await?;

        self.toggle_role(guild_id, user_id, role.id, enable).await
    }

    /// Runs one reconciliation pass for a guild.
    ///
    /// Under the guild's lock:
    /// 1. Resolves the managed role
    /// 2. Gets the members holding it and the members in any voice channel
    /// 3. Revokes the role from holders not in a call and grants it to callers without it
    ///
    /// Every toggle is attempted even if earlier ones fail. Failed toggles are logged and
    /// listed in the report rather than returned, so the next pass can retry them.
    ///
    /// # Returns
    /// - `Ok(SyncReport)` - Pass completed; some individual toggles may have failed
    /// - `Err(VoiceRoleError::RoleLookupFailed | RoleNotFound)` - No toggles attempted
    /// - `Err(VoiceRoleError::MembershipQueryFailed)` - No toggles attempted
    pub async fn sync_voice_roles(&self, guild_id: GuildId) -> Result<SyncReport, VoiceRoleError> {
        let _guard = self.guilds.lock(guild_id).await;

        let role = self.find_role(guild_id, self.role_name).await?;

        let role_members = self.members_with_role(guild_id, &role).await?;
        tracing::info!(
            "Members with role {} in guild {}: {}",
            role.name,
            guild_id,
            self.member_list(guild_id, &role_members)
        );

        let call_members = self.members_in_call(guild_id).await;
        tracing::info!(
            "Members in voice in guild {}: {}",
            guild_id,
            self.member_list(guild_id, &call_members)
        );

        let mut report = SyncReport::default();

        // Members that are not in a call, but have the role.
        for user_id in role_members.diff(&call_members) {
            match self.toggle_role(guild_id, user_id, role.id, false).await {
                Ok(()) => report.removed.add(user_id),
                Err(e) => {
                    tracing::error!("Failed to remove voice role: {}", e);
                    report.failed.add(user_id);
                }
            }
        }

        // Members that are in a call, but have no role.
        for user_id in call_members.diff(&role_members) {
            match self.toggle_role(guild_id, user_id, role.id, true).await {
                Ok(()) => report.added.add(user_id),
                Err(e) => {
                    tracing::error!("Failed to add voice role: {}", e);
                    report.failed.add(user_id);
                }
            }
        }

        Ok(report)
    }

    fn role_display_name(&self, guild_id: GuildId, role_id: RoleId) -> String {
        self.names
            .and_then(|names| names.role_name(guild_id, role_id))
            .unwrap_or_else(|| UNKNOWN_NAME.to_string())
    }

    fn member_display_name(&self, guild_id: GuildId, user_id: UserId) -> String {
        self.names
            .and_then(|names| names.member_name(guild_id, user_id))
            .unwrap_or_else(|| UNKNOWN_NAME.to_string())
    }
}
