use std::time::Duration;

use crate::shared::AppError;

pub const DEFAULT_API_BASE: &str = "https://www.aoe2insights.com/api";
pub const DEFAULT_LASTMATCH_PATH: &str = "/player/{id}/lastmatch/";
pub const DEFAULT_MATCHES_PATH: &str = "/player/{id}/matches/";
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration read from the environment at startup.
///
/// `BOT_TOKEN` and `CHAT_ID` are mandatory; the process must not start
/// without them. Everything else has a default so the API endpoints can be
/// swapped without a code change when the upstream moves again.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub chat_id: i64,
    pub api_base: String,
    pub lastmatch_path: String,
    pub matches_path: String,
    pub check_interval: Duration,
    pub http_timeout: Duration,
    /// Path for the JSON state file. `None` disables persistence.
    pub state_file: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let bot_token = std::env::var("BOT_TOKEN")
            .map_err(|_| AppError::Config("BOT_TOKEN is not set".to_string()))?;

        let chat_id_raw = std::env::var("CHAT_ID")
            .map_err(|_| AppError::Config("CHAT_ID is not set".to_string()))?;
        let chat_id = chat_id_raw.trim().parse::<i64>().map_err(|_| {
            AppError::Config(format!(
                "CHAT_ID must be a numeric chat ID, got {chat_id_raw:?}"
            ))
        })?;

        Ok(Self {
            bot_token,
            chat_id,
            api_base: env_or("AOE_API_BASE", DEFAULT_API_BASE),
            lastmatch_path: env_or("AOE_API_LASTMATCH_PATH", DEFAULT_LASTMATCH_PATH),
            matches_path: env_or("AOE_API_MATCHES_PATH", DEFAULT_MATCHES_PATH),
            check_interval: Duration::from_secs(env_secs(
                "CHECK_INTERVAL",
                DEFAULT_CHECK_INTERVAL_SECS,
            )),
            http_timeout: Duration::from_secs(env_secs(
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )),
            state_file: std::env::var("STATE_FILE").ok().filter(|v| !v.is_empty()),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_secs(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}
