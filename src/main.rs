mod config;
mod core;
mod error;
mod providers;
mod recipients;
mod reporter;

use anyhow::Result;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::core::runtime::Runtime;
use crate::providers::nasa::{ApodClient, APOD_URL};
use crate::providers::telegram::TelegramMessenger;
use crate::providers::translate::YandexTranslator;
use crate::recipients::RecipientStore;
use crate::reporter::{Reporter, RollingLog, LOG_BACKUP_COUNT, LOG_MAX_BYTES};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenv() {
        eprintln!("no .env file loaded: {e}");
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("apod_bot=info")),
        )
        .init();

    let config = Config::from_env()?;

    let reporter = Reporter::new(RollingLog::new(&config.log_file, LOG_MAX_BYTES, LOG_BACKUP_COUNT));
    reporter.info("bot started");

    let runtime = Runtime::new(
        ApodClient::new(APOD_URL, &config.nasa_token),
        YandexTranslator::new(&config.yandex_translate_key),
        TelegramMessenger::new(&config.telegram_bot_token),
        RecipientStore::new(&config.recipients_file),
        reporter,
        config.admin_chat_id,
        config.poll_interval,
    );
    runtime.run().await;

    Ok(())
}
