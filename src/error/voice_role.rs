//! Errors raised while resolving, querying or toggling the managed voice role.

use serenity::all::{GuildId, UserId};
use thiserror::Error;

/// Failure of a single voice role operation.
///
/// Platform causes are boxed `serenity::Error`s. None of these are fatal: event handlers log
/// and drop them, and the reconciler either aborts the current pass (lookup and membership
/// failures) or records the failed member and continues (toggle failures).
#[derive(Error, Debug)]
pub enum VoiceRoleError {
    /// Listing the guild's roles failed.
    #[error("Failed to get roles for guild {guild_id}: {source}")]
    RoleLookupFailed {
        guild_id: GuildId,
        #[source]
        source: Box<serenity::Error>,
    },

    /// No role with the configured name exists in the guild.
    #[error("Could not find role \"{name}\" in guild {guild_id}")]
    RoleNotFound { guild_id: GuildId, name: String },

    /// Adding the role to, or removing it from, a member failed.
    #[error("Failed to toggle role \"{role}\" (enable={enable}) for member {user_id}: {source}")]
    RoleToggleFailed {
        role: String,
        user_id: UserId,
        enable: bool,
        #[source]
        source: Box<serenity::Error>,
    },

    /// Listing the members that hold the role failed.
    #[error("Failed to get members with role \"{role}\" in guild {guild_id}: {source}")]
    MembershipQueryFailed {
        guild_id: GuildId,
        role: String,
        #[source]
        source: Box<serenity::Error>,
    },
}
