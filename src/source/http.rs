use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, Url};

use super::{FeedResponse, FeedTransport, FetchError};

static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("band-site/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|err| {
            tracing::warn!("custom http client unavailable, using defaults: {err}");
            Client::new()
        })
});

/// Plain GET over the shared reqwest client.
#[derive(Clone, Default)]
pub struct HttpTransport;

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<FeedResponse, FetchError> {
        let response = CLIENT
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| FetchError::Network(format!("request failed for {url}: {err}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| FetchError::Network(format!("unable to read body for {url}: {err}")))?;

        Ok(FeedResponse { status, body })
    }
}
