//! Access layer for the chat platform.
//!
//! Discord is the source of truth for every piece of state the bot works with. This layer
//! exposes the handful of Discord operations the voice role service needs as injectable
//! capabilities, and converts Serenity objects into domain models at the boundary.

pub mod discord;
