use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;

use crate::error::ApiError;

pub const APOD_URL: &str = "https://api.nasa.gov/planetary/apod";

/// One picture-of-the-day entry. Ephemeral: lives for a single cycle, never
/// persisted. The API returns more fields (media_type, service_version, ...);
/// only these four matter for a broadcast.
#[derive(Debug, Clone, Deserialize)]
pub struct Apod {
    pub url: String,
    pub title: String,
    pub explanation: String,
    pub date: String,
}

impl Apod {
    pub fn caption(&self) -> String {
        format!("📅 {}\n\n🔭 {}\n\nℹ️ {}", self.date, self.title, self.explanation)
    }
}

/// Seam between the runtime and the photo API, so cycle tests can count
/// fetches and downloads without the network.
#[async_trait]
pub trait PhotoSource {
    async fn fetch_one(&self) -> Result<Apod, ApiError>;
    async fn download_image(&self, url: &str) -> Result<Bytes, ApiError>;
}

pub struct ApodClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl ApodClient {
    pub fn new(base_url: impl Into<String>, api_key: &str) -> Self {
        ApodClient {
            base_url: base_url.into(),
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PhotoSource for ApodClient {
    /// Requests a single random entry (`count=1` returns a one-element list).
    async fn fetch_one(&self) -> Result<Apod, ApiError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("api_key", self.api_key.as_str()), ("count", "1")])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        let body = response.text().await?;
        parse_apod(&body)
    }

    async fn download_image(&self, url: &str) -> Result<Bytes, ApiError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        Ok(response.bytes().await?)
    }
}

pub fn parse_apod(body: &str) -> Result<Apod, ApiError> {
    let mut items: Vec<Apod> =
        serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))?;
    if items.is_empty() {
        return Err(ApiError::Malformed("empty result list".to_string()));
    }
    Ok(items.remove(0))
}
