//! Error types for the voicerole bot.
//!
//! `AppError` is the top-level error returned from startup and from the bot runner. It
//! wraps the domain-specific errors of each layer so `?` works across them. Errors raised
//! while handling gateway events or running a scheduled sync never reach `main`; they are
//! logged where they occur.

pub mod config;
pub mod voice_role;

use thiserror::Error;

use crate::error::config::ConfigError;

/// Top-level application error type.
///
/// Most variants use `#[from]` for automatic error conversion. Any `AppError` that reaches
/// `main` is fatal: it is logged and the process exits with a non-zero status.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Discord API or gateway error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Job scheduler error while starting the scheduler or registering a sync job.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
