//! Domain models shared by the service, data and bot layers.
//!
//! Serenity types are converted into these models at the data boundary so the reconciliation
//! logic only depends on identifiers and names.

pub mod discord;
pub mod member_set;
