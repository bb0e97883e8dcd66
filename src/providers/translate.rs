use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ApiError;

const YANDEX_TRANSLATE_URL: &str = "https://translate.api.cloud.yandex.net/translate/v2/translate";

/// The broadcast audience reads Russian; the locale is fixed, not configured.
pub const TARGET_LANGUAGE: &str = "ru";

#[derive(Serialize)]
struct TranslateRequest<'a> {
    #[serde(rename = "targetLanguageCode")]
    target_language_code: &'a str,
    texts: Vec<&'a str>,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translations: Vec<TranslatedText>,
}

#[derive(Deserialize)]
struct TranslatedText {
    text: String,
}

/// Localization is best-effort by design: a broadcast with the original
/// caption beats no broadcast, so `translate` never fails.
#[async_trait]
pub trait Translate {
    async fn translate(&self, text: &str) -> String;
}

pub struct YandexTranslator {
    endpoint: String,
    api_key: String,
    http: reqwest::Client,
}

impl YandexTranslator {
    pub fn new(api_key: &str) -> Self {
        Self::with_endpoint(YANDEX_TRANSLATE_URL, api_key)
    }

    pub fn with_endpoint(endpoint: impl Into<String>, api_key: &str) -> Self {
        YandexTranslator {
            endpoint: endpoint.into(),
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
        }
    }

    async fn request_translation(&self, text: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("Api-Key {}", self.api_key))
            .json(&TranslateRequest {
                target_language_code: TARGET_LANGUAGE,
                texts: vec![text],
            })
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        let body = response.text().await?;
        let parsed: TranslateResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))?;
        parsed
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| ApiError::Malformed("empty translations list".to_string()))
    }
}

#[async_trait]
impl Translate for YandexTranslator {
    async fn translate(&self, text: &str) -> String {
        match self.request_translation(text).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!("translation failed, broadcasting the original text: {e}");
                text.to_string()
            }
        }
    }
}
