use maud::{html, Markup, DOCTYPE};
use serde::{Deserialize, Serialize};

use crate::config::{SiteConfig, EVENTS_REGION_PATH};
use crate::render::render_cards;
use crate::resolver::Resolution;

/// Element ids of the host document regions the feed writes into.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayRegions {
    pub loading: String,
    pub list: String,
    pub empty: String,
    pub error: String,
    pub year: String,
}

impl Default for DisplayRegions {
    fn default() -> Self {
        Self {
            loading: "eventsLoading".to_string(),
            list: "eventsList".to_string(),
            empty: "noEvents".to_string(),
            error: "eventsError".to_string(),
            year: "currentYear".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    Loading,
    Populated,
    Empty,
    Error,
}

/// Contents of the events regions at one point of a resolution.
#[derive(Debug, Clone)]
pub struct PageView {
    pub state: FeedState,
    pub cards: Markup,
}

impl PageView {
    pub fn loading() -> Self {
        Self {
            state: FeedState::Loading,
            cards: html! {},
        }
    }

    /// The single terminal transition out of Loading.
    pub fn finish(self, resolution: &Resolution) -> Self {
        let (state, cards) = match resolution {
            Resolution::Populated { events, .. } => (FeedState::Populated, render_cards(events)),
            Resolution::Empty => (FeedState::Empty, html! {}),
            Resolution::Error(_) => (FeedState::Error, html! {}),
        };
        tracing::debug!(from = ?self.state, to = ?state, "events region settled");
        Self { state, cards }
    }

    pub fn loading_visible(&self) -> bool {
        self.state == FeedState::Loading
    }

    pub fn empty_visible(&self) -> bool {
        self.state == FeedState::Empty
    }

    pub fn error_visible(&self) -> bool {
        self.state == FeedState::Error
    }
}

pub fn render_events_region(regions: &DisplayRegions, view: &PageView) -> Markup {
    html! {
        div.events-loading id=(regions.loading) style=[hidden_unless(view.loading_visible())] {
            div.spinner {}
            p { "Loading shows..." }
        }
        div.events-list id=(regions.list) {
            (view.cards)
        }
        div.events-empty id=(regions.empty) style=[hidden_unless(view.empty_visible())] {
            p { "No upcoming shows right now. Check back soon!" }
        }
        div.events-error id=(regions.error) style=[hidden_unless(view.error_visible())] {
            p { "Unable to load shows. Please try again later." }
            a.events-retry href=(EVENTS_REGION_PATH) { "Try again" }
        }
    }
}

pub fn render_page(config: &SiteConfig, view: &PageView, year: i32) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (config.site_title) }
            }
            body {
                main {
                    section id="shows" class="events fade-in" {
                        h2 { "Upcoming Shows" }
                        (render_events_region(&config.regions, view))
                    }
                }
                footer {
                    p { "© " span id=(config.regions.year) { (year) } " " (config.site_title) }
                }
            }
        }
    }
}

fn hidden_unless(visible: bool) -> Option<&'static str> {
    if visible {
        None
    } else {
        Some("display: none")
    }
}
