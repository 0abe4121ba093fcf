use std::sync::Arc;

use crate::config::SiteConfig;
use crate::models::EventRecord;
use crate::source::{self, FeedTransport, FetchError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOrigin {
    Demo,
    Remote,
    /// Demo list shown because the live source failed.
    Fallback,
}

/// Terminal outcome of one feed resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Populated {
        events: Vec<EventRecord>,
        origin: FeedOrigin,
    },
    Empty,
    Error(FetchError),
}

impl Resolution {
    pub fn events(&self) -> &[EventRecord] {
        match self {
            Resolution::Populated { events, .. } => events,
            Resolution::Empty | Resolution::Error(_) => &[],
        }
    }
}

pub struct FeedResolver {
    config: SiteConfig,
    transport: Arc<dyn FeedTransport>,
}

impl FeedResolver {
    pub fn new(config: SiteConfig, transport: Arc<dyn FeedTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Never fails: fetch errors end in the fallback feed or `Resolution::Error`.
    pub async fn resolve(&self) -> Resolution {
        let origin = if self.config.use_demo_data {
            FeedOrigin::Demo
        } else {
            FeedOrigin::Remote
        };

        match source::fetch_events(&self.config, self.transport.as_ref()).await {
            Ok(events) if events.is_empty() => {
                tracing::info!(?origin, "event feed is empty");
                Resolution::Empty
            }
            Ok(events) => {
                tracing::debug!(?origin, count = events.len(), "event feed resolved");
                Resolution::Populated { events, origin }
            }
            Err(err) => {
                tracing::warn!(api_url = %self.config.api_url, "error loading events: {err}");
                self.fallback(err)
            }
        }
    }

    fn fallback(&self, err: FetchError) -> Resolution {
        let fallback_available = !self.config.use_demo_data
            && self.config.fallback_to_demo
            && !self.config.demo_events.is_empty();
        if !fallback_available {
            return Resolution::Error(err);
        }

        tracing::warn!(
            count = self.config.demo_events.len(),
            "serving demo events in place of the live feed"
        );
        Resolution::Populated {
            events: self.config.demo_events.clone(),
            origin: FeedOrigin::Fallback,
        }
    }
}
