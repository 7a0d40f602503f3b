use std::time::Duration;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_VOICE_ROLE_NAME: &str = "voice";
const DEFAULT_SYNC_INTERVAL_SECONDS: u64 = 60;

pub struct Config {
    pub discord_bot_token: String,

    /// Exact, case-sensitive name of the role kept in sync with voice presence.
    pub voice_role_name: String,
    /// Time between reconciliation passes for each guild.
    pub sync_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let discord_bot_token = var("DISCORD_BOT_TOKEN")
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?;

        let voice_role_name =
            var("VOICE_ROLE_NAME").unwrap_or_else(|| DEFAULT_VOICE_ROLE_NAME.to_string());

        let sync_interval_seconds = match var("VOICE_SYNC_INTERVAL_SECONDS") {
            Some(value) => parse_interval_seconds("VOICE_SYNC_INTERVAL_SECONDS", &value)?,
            None => DEFAULT_SYNC_INTERVAL_SECONDS,
        };

        Ok(Self {
            discord_bot_token,
            voice_role_name,
            sync_interval: Duration::from_secs(sync_interval_seconds),
        })
    }
}

fn parse_interval_seconds(name: &str, value: &str) -> Result<u64, ConfigError> {
    let seconds = value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

    if seconds == 0 {
        return Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: "interval must be at least one second".to_string(),
        });
    }

    Ok(seconds)
}
