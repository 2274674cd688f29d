use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected response status: {0}")]
    Status(StatusCode),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type SiteResult<T> = Result<T, SiteError>;
