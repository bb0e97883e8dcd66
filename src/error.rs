use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to one of the HTTP dependencies (photo API, image host,
/// translation API).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Everything that can abort one fetch-translate-broadcast cycle. Translation
/// failures never appear here (the translator falls back to the source text),
/// and per-recipient send failures are collected in the cycle summary instead
/// of aborting the loop.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("photo fetch failed: {0}")]
    Fetch(#[source] ApiError),

    #[error("image download failed: {0}")]
    Download(#[source] ApiError),

    #[error("telegram api: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("recipient store: {0}")]
    Store(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_status_display() {
        let e = ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.to_string(), "unexpected HTTP status 500 Internal Server Error");
    }

    #[test]
    fn api_error_malformed_display() {
        let e = ApiError::Malformed("missing field `url`".to_string());
        assert_eq!(e.to_string(), "malformed response: missing field `url`");
    }

    #[test]
    fn cycle_error_carries_stage_context() {
        let e = CycleError::Fetch(ApiError::Status(StatusCode::BAD_GATEWAY));
        assert_eq!(e.to_string(), "photo fetch failed: unexpected HTTP status 502 Bad Gateway");

        let e = CycleError::Download(ApiError::Malformed("not an image".to_string()));
        assert_eq!(e.to_string(), "image download failed: malformed response: not an image");
    }
}
