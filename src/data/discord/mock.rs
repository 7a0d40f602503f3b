//! In-memory Discord capabilities for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serenity::all::{ChannelId, GuildId, RoleId, UserId};
use serenity::async_trait;

use crate::{
    data::discord::{DiscordApi, NameCache},
    model::{
        discord::{GuildRole, VoiceChannelOccupants},
        member_set::MemberSet,
    },
};

/// Role change recorded by `MockDiscordApi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleCall {
    pub user_id: UserId,
    pub role_id: RoleId,
    pub enable: bool,
}

#[derive(Default)]
struct MockState {
    roles: Vec<GuildRole>,
    holders: MemberSet<UserId>,
    channels: Vec<VoiceChannelOccupants>,
    fail_get_roles: bool,
    fail_members: bool,
    fail_toggle_for: MemberSet<UserId>,
    toggle_delay: Option<Duration>,
    calls: Vec<ToggleCall>,
    events: Vec<String>,
    member_names: HashMap<UserId, String>,
}

/// In-memory Discord for a single guild.
///
/// Successful role changes update the holder set, so a second reconciliation pass observes
/// the result of the first. Also serves as its own name cache: members registered with
/// `with_member_name` resolve, every other lookup returns `None`.
#[derive(Default)]
pub struct MockDiscordApi {
    state: Mutex<MockState>,
}

impl MockDiscordApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(self, role_id: u64, name: &str) -> Self {
        self.state.lock().unwrap().roles.push(GuildRole {
            id: RoleId::new(role_id),
            name: name.to_string(),
        });
        self
    }

    pub fn with_holders(self, user_ids: &[u64]) -> Self {
        self.state.lock().unwrap().holders = ids(user_ids);
        self
    }

    pub fn with_voice_channel(self, channel_id: u64, user_ids: &[u64]) -> Self {
        self.state
            .lock()
            .unwrap()
            .channels
            .push(VoiceChannelOccupants {
                channel_id: ChannelId::new(channel_id),
                members: user_ids.iter().map(|id| UserId::new(*id)).collect(),
            });
        self
    }

    pub fn with_member_name(self, user_id: u64, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .member_names
            .insert(UserId::new(user_id), name.to_string());
        self
    }

    pub fn failing_get_roles(self) -> Self {
        self.state.lock().unwrap().fail_get_roles = true;
        self
    }

    pub fn failing_members(self) -> Self {
        self.state.lock().unwrap().fail_members = true;
        self
    }

    pub fn failing_toggle_for(self, user_ids: &[u64]) -> Self {
        self.state.lock().unwrap().fail_toggle_for = ids(user_ids);
        self
    }

    /// Makes every role change wait before completing, giving other tasks a chance to run.
    pub fn with_toggle_delay(self, delay: Duration) -> Self {
        self.state.lock().unwrap().toggle_delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<ToggleCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn toggled(&self, enable: bool) -> MemberSet<UserId> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| call.enable == enable)
            .map(|call| call.user_id)
            .collect()
    }

    pub fn holders(&self) -> MemberSet<UserId> {
        self.state.lock().unwrap().holders.clone()
    }

    pub fn events(&self) -> Vec<String> {
        self.state.lock().unwrap().events.clone()
    }

    pub fn clear_calls(&self) {
        let mut state = self.state.lock().unwrap();
        state.calls.clear();
        state.events.clear();
    }

    fn record(&self, event: String) {
        self.state.lock().unwrap().events.push(event);
    }

    async fn toggle(
        &self,
        user_id: UserId,
        role_id: RoleId,
        enable: bool,
    ) -> Result<(), serenity::Error> {
        let delay = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(ToggleCall {
                user_id,
                role_id,
                enable,
            });
            state.events.push(format!("toggle-start {}", user_id));
            state.toggle_delay
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().unwrap();
        state.events.push(format!("toggle-end {}", user_id));

        if state.fail_toggle_for.contains(&user_id) {
            return Err(serenity::Error::Other("toggle failed"));
        }

        if enable {
            state.holders.add(user_id);
        } else {
            state.holders = state.holders.diff(&MemberSet::from([user_id]));
        }

        Ok(())
    }
}

#[async_trait]
impl DiscordApi for MockDiscordApi {
    async fn get_roles(&self, _guild_id: GuildId) -> Result<Vec<GuildRole>, serenity::Error> {
        self.record("get-roles".to_string());

        let state = self.state.lock().unwrap();
        if state.fail_get_roles {
            return Err(serenity::Error::Other("get roles failed"));
        }

        Ok(state.roles.clone())
    }

    async fn get_members_with_role(
        &self,
        _guild_id: GuildId,
        _role_id: RoleId,
    ) -> Result<Vec<UserId>, serenity::Error> {
        self.record("get-members".to_string());

        let state = self.state.lock().unwrap();
        if state.fail_members {
            return Err(serenity::Error::Other("get members failed"));
        }

        Ok(state.holders.iter().copied().collect())
    }

    async fn get_voice_channel_occupants(&self, _guild_id: GuildId) -> Vec<VoiceChannelOccupants> {
        self.state.lock().unwrap().channels.clone()
    }

    async fn add_member_role(
        &self,
        _guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), serenity::Error> {
        self.toggle(user_id, role_id, true).await
    }

    async fn remove_member_role(
        &self,
        _guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), serenity::Error> {
        self.toggle(user_id, role_id, false).await
    }
}

impl NameCache for MockDiscordApi {
    fn role_name(&self, _guild_id: GuildId, role_id: RoleId) -> Option<String> {
        let state = self.state.lock().unwrap();

        state
            .roles
            .iter()
            .find(|role| role.id == role_id)
            .map(|role| role.name.clone())
    }

    fn member_name(&self, _guild_id: GuildId, user_id: UserId) -> Option<String> {
        self.state.lock().unwrap().member_names.get(&user_id).cloned()
    }
}

/// Name cache backed by fixed maps.
#[derive(Default)]
pub struct MockNameCache {
    roles: HashMap<RoleId, String>,
    members: HashMap<UserId, String>,
}

impl MockNameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(mut self, role_id: u64, name: &str) -> Self {
        self.roles.insert(RoleId::new(role_id), name.to_string());
        self
    }

    pub fn with_member(mut self, user_id: u64, name: &str) -> Self {
        self.members.insert(UserId::new(user_id), name.to_string());
        self
    }
}

impl NameCache for MockNameCache {
    fn role_name(&self, _guild_id: GuildId, role_id: RoleId) -> Option<String> {
        self.roles.get(&role_id).cloned()
    }

    fn member_name(&self, _guild_id: GuildId, user_id: UserId) -> Option<String> {
        self.members.get(&user_id).cloned()
    }
}

/// Builds a member set from raw IDs.
pub fn ids(user_ids: &[u64]) -> MemberSet<UserId> {
    user_ids.iter().map(|id| UserId::new(*id)).collect()
}
