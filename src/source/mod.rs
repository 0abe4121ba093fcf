pub mod http;
pub mod payload;

use async_trait::async_trait;
use reqwest::Url;
use thiserror::Error;

use crate::config::SiteConfig;
use crate::models::EventRecord;

pub use http::HttpTransport;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone)]
pub struct FeedResponse {
    pub status: u16,
    pub body: String,
}

/// One GET against the events endpoint. Swapped out in tests.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<FeedResponse, FetchError>;
}

pub async fn fetch_events(
    config: &SiteConfig,
    transport: &dyn FeedTransport,
) -> Result<Vec<EventRecord>, FetchError> {
    if config.use_demo_data {
        return Ok(config.demo_events.clone());
    }

    let url = config.absolute_api_url().map_err(FetchError::Network)?;
    let response = transport.get(&url).await?;
    if response.status != 200 {
        return Err(FetchError::HttpStatus(response.status));
    }
    payload::decode_events(&response.body)
}
