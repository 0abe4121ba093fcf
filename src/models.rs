use reqwest::Url;
use serde::{Deserialize, Serialize};

pub const TICKET_PLACEHOLDER: &str = "#";
const FREE_PRICES: [&str; 2] = ["Free", "$0"];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub date: String, // display string, never parsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub venue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default)]
    pub ticket_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_free: Option<bool>,
}

impl EventRecord {
    pub fn time(&self) -> Option<&str> {
        present(&self.time)
    }

    pub fn price(&self) -> Option<&str> {
        present(&self.price)
    }

    /// City and state joined with ", ", or whichever one is present.
    pub fn location(&self) -> Option<String> {
        match (present(&self.city), present(&self.state)) {
            (Some(city), Some(state)) => Some(format!("{city}, {state}")),
            (Some(single), None) | (None, Some(single)) => Some(single.to_string()),
            (None, None) => None,
        }
    }

    /// Ticket URL usable as a link target. The `#` placeholder and anything
    /// that is not an absolute http(s) URL count as missing.
    pub fn ticket_link(&self) -> Option<&str> {
        present(&self.ticket_url)
            .filter(|url| *url != TICKET_PLACEHOLDER)
            .filter(|url| {
                Url::parse(url)
                    .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
                    .unwrap_or(false)
            })
    }

    pub fn has_tickets(&self) -> bool {
        self.ticket_link().is_some()
    }

    pub fn is_free_event(&self) -> bool {
        self.is_free.unwrap_or(false)
            || self
                .price()
                .map(|price| FREE_PRICES.contains(&price))
                .unwrap_or(false)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}
