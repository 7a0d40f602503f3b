//! Discord domain models.
//!
//! Provides the role, voice channel and voice transition models the voice role service
//! works with. Serenity objects are converted into these at the data boundary.

use serenity::all::{ChannelId, Role, RoleId, UserId};

/// Discord role within a guild, reduced to what role resolution needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildRole {
    /// Discord role ID.
    pub id: RoleId,
    /// Role display name, compared exactly (case-sensitive) during resolution.
    pub name: String,
}

impl GuildRole {
    /// Converts a Serenity role to a domain model at the data boundary.
    ///
    /// # Arguments
    /// - `role` - Serenity role object as returned by Discord
    ///
    /// # Returns
    /// - `GuildRole` - Domain model holding the role's ID and name
    pub fn from_role(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
        }
    }
}

/// Members currently connected to one voice or stage channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceChannelOccupants {
    pub channel_id: ChannelId,
    pub members: Vec<UserId>,
}

/// What a single voice state update means for a member's voice presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceTransition {
    /// Member connected to a voice channel from not being in one.
    Join,
    /// Member disconnected from voice entirely.
    Leave,
    /// Member switched from one voice channel to another.
    Move,
    /// Channel did not change (mute, deafen, stream or video toggles).
    Unchanged,
}

impl VoiceTransition {
    /// Classifies an update from the member's previous and new channel.
    ///
    /// A missing previous state (member not in cache) counts as "not connected". An update
    /// with no channel on either side is a `Leave`: the member is not in a call afterwards,
    /// whatever the cache knew before.
    ///
    /// # Arguments
    /// - `old` - Channel the member was connected to before the update, if any
    /// - `new` - Channel the member is connected to after the update, if any
    pub fn from_channels(old: Option<ChannelId>, new: Option<ChannelId>) -> Self {
        match (old, new) {
            (None, Some(_)) => Self::Join,
            (_, None) => Self::Leave,
            (Some(old), Some(new)) if old != new => Self::Move,
            _ => Self::Unchanged,
        }
    }

    /// The role state this transition requires, or `None` if the role must be left alone.
    pub fn desired_role_state(self) -> Option<bool> {
        match self {
            Self::Join => Some(true),
            Self::Leave => Some(false),
            Self::Move | Self::Unchanged => None,
        }
    }
}
