use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use teloxide::types::ChatId;

/// Everything the bot needs from the environment. Loaded once at startup;
/// a missing required variable is the only error that terminates the process.
#[derive(Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    pub nasa_token: String,
    pub yandex_translate_key: String,
    pub admin_chat_id: ChatId,
    pub poll_interval: Duration,
    pub recipients_file: PathBuf,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            telegram_bot_token: require("TELEGRAM_BOT_TOKEN")?,
            nasa_token: require("NASA_TOKEN")?,
            yandex_translate_key: require("YANDEX_TRANSLATE_KEY")?,
            admin_chat_id: require("TELEGRAM_ERROR_CHAT_ID")?
                .parse::<i64>()
                .map(ChatId)
                .context("TELEGRAM_ERROR_CHAT_ID must be a numeric chat id")?,
            poll_interval: require("POLL_INTERVAL_HOURS")?
                .parse::<u64>()
                .map(|hours| Duration::from_secs(hours * 60 * 60))
                .context("POLL_INTERVAL_HOURS must be a whole number of hours")?,
            recipients_file: optional("RECIPIENTS_FILE", "chat_ids.txt"),
            log_file: optional("LOG_FILE", "apod_bot.log"),
        })
    }
}

fn require(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("missing required environment variable {name}"))
}

fn optional(name: &str, default: &str) -> PathBuf {
    env::var(name).map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(default))
}
