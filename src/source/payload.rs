use serde::Deserialize;

use super::FetchError;
use crate::models::EventRecord;

/// The two response bodies the events endpoint has ever produced.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FeedPayload {
    Wrapped { events: Vec<EventRecord> },
    Bare(Vec<EventRecord>),
}

impl FeedPayload {
    pub fn into_events(self) -> Vec<EventRecord> {
        match self {
            FeedPayload::Wrapped { events } => events,
            FeedPayload::Bare(events) => events,
        }
    }
}

pub fn decode_events(body: &str) -> Result<Vec<EventRecord>, FetchError> {
    serde_json::from_str::<FeedPayload>(body)
        .map(FeedPayload::into_events)
        .map_err(|err| FetchError::Parse(err.to_string()))
}
