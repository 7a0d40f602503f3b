//! Discord bot integration for voice role management.
//!
//! This module connects the bot to Discord's gateway and routes the events the voice role
//! feature needs to their handlers. Each handler builds a `SerenityDiscordApi` from the
//! event's context and delegates to `VoiceRoleService` or the sync scheduler.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive guild availability events and populate the channel and role cache
//! - `GUILD_MEMBERS` - List guild members to find the role holders (privileged intent)
//! - `GUILD_VOICE_STATES` - Receive voice join/leave events and track voice channel occupants
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod handler;
pub mod start;
