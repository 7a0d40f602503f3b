//! Periodic jobs run by the bot's `tokio-cron-scheduler` instance.

pub mod voice_sync;
