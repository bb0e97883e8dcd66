use std::collections::HashSet;

use bytes::Bytes;
use teloxide::types::ChatId;
use teloxide::RequestError;
use tokio::time::{sleep, Duration};

use crate::error::CycleError;
use crate::providers::nasa::PhotoSource;
use crate::providers::telegram::Messenger;
use crate::providers::translate::Translate;
use crate::recipients::RecipientStore;
use crate::reporter::Reporter;

pub struct Runtime<P, T, M> {
    photos: P,
    translator: T,
    messenger: M,
    store: RecipientStore,
    reporter: Reporter,
    admin: ChatId,
    interval: Duration,
}

#[derive(Debug)]
pub struct CycleSummary {
    pub delivered: usize,
    pub failures: Vec<(ChatId, RequestError)>,
}

impl<P, T, M> Runtime<P, T, M>
where
    P: PhotoSource,
    T: Translate,
    M: Messenger,
{
    pub fn new(
        photos: P,
        translator: T,
        messenger: M,
        store: RecipientStore,
        reporter: Reporter,
        admin: ChatId,
        interval: Duration,
    ) -> Self {
        Runtime {
            photos,
            translator,
            messenger,
            store,
            reporter,
            admin,
            interval,
        }
    }

    /// One cycle, report the outcome, sleep, forever. Nothing past startup is
    /// fatal; the process runs until killed from outside.
    pub async fn run(self) {
        loop {
            match self.cycle().await {
                Ok(summary) => self.report_summary(&summary).await,
                Err(e) => self.report_cycle_error(&e).await,
            }
            sleep(self.interval).await;
        }
    }

    /// Fetch one photo, download it once, merge stored recipients with chats
    /// discovered from pending updates, then send photo + caption to each.
    /// A recipient that cannot be reached is recorded and skipped rather than
    /// aborting the rest of the broadcast.
    pub async fn cycle(&self) -> Result<CycleSummary, CycleError> {
        let apod = self.photos.fetch_one().await.map_err(CycleError::Fetch)?;
        let image = self
            .photos
            .download_image(&apod.url)
            .await
            .map_err(CycleError::Download)?;

        let known = self.store.load()?;
        let discovered = self.messenger.poll_chat_ids().await?;
        for id in &discovered {
            if !known.contains(id) {
                self.store.save(*id)?;
            }
        }
        let recipients: HashSet<ChatId> = known.union(&discovered).copied().collect();

        let caption = self.translator.translate(&apod.caption()).await;

        let mut delivered = 0;
        let mut failures = Vec::new();
        for id in recipients {
            match self.send_to(id, image.clone(), &caption).await {
                Ok(()) => delivered += 1,
                Err(e) => failures.push((id, e)),
            }
        }
        Ok(CycleSummary { delivered, failures })
    }

    async fn send_to(&self, chat: ChatId, image: Bytes, caption: &str) -> Result<(), RequestError> {
        self.messenger.send_photo(chat, image).await?;
        self.messenger.send_text(chat, caption).await
    }

    pub async fn report_summary(&self, summary: &CycleSummary) {
        self.reporter.info(&format!(
            "cycle complete: photo delivered to {} recipient(s)",
            summary.delivered
        ));
        if summary.failures.is_empty() {
            return;
        }
        let detail = summary
            .failures
            .iter()
            .map(|(id, e)| format!("{}: {e}", id.0))
            .collect::<Vec<_>>()
            .join("; ");
        self.reporter
            .alert(
                &self.messenger,
                self.admin,
                &format!(
                    "delivery failed for {} recipient(s): {detail}",
                    summary.failures.len()
                ),
            )
            .await;
    }

    pub async fn report_cycle_error(&self, error: &CycleError) {
        self.reporter
            .alert(&self.messenger, self.admin, &format!("cycle failed: {error}"))
            .await;
    }
}
