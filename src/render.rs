use maud::{html, Markup, Render};

use crate::models::EventRecord;

const TIME_PLACEHOLDER: &str = "TBA";
const LOCATION_PLACEHOLDER: &str = "Location TBA";
const TICKET_LABEL: &str = "Tickets";

/// What a card offers next to the show details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Affordance<'a> {
    TicketLink { url: &'a str, label: &'a str },
    FreeBadge,
    None,
}

impl<'a> Affordance<'a> {
    /// Ticket link wins over the free badge.
    pub fn for_event(event: &'a EventRecord) -> Self {
        if let Some(url) = event.ticket_link() {
            return Affordance::TicketLink {
                url,
                label: event.price().unwrap_or(TICKET_LABEL),
            };
        }
        if event.is_free_event() {
            return Affordance::FreeBadge;
        }
        Affordance::None
    }
}

impl Render for Affordance<'_> {
    fn render(&self) -> Markup {
        match self {
            Affordance::TicketLink { url, label } => html! {
                a.btn-ticket href=(url) target="_blank" rel="noopener" {
                    i.fas.fa-ticket-alt {}
                    " " (label)
                }
            },
            Affordance::FreeBadge => html! {
                span.btn-ticket.btn-free {
                    i.fas.fa-heart {}
                    " Free Event"
                }
            },
            Affordance::None => html! {},
        }
    }
}

pub fn render_card(event: &EventRecord) -> Markup {
    let location = event.location();
    html! {
        article.event-card data-event-id=(event.id) {
            div.event-date-wrapper {
                div.event-date { (event.date) }
                div.event-time { (event.time().unwrap_or(TIME_PLACEHOLDER)) }
            }
            div.event-info {
                h3.event-venue { (event.venue) }
                p.event-location { (location.as_deref().unwrap_or(LOCATION_PLACEHOLDER)) }
            }
            div.event-action { (Affordance::for_event(event)) }
        }
    }
}

pub fn render_cards(events: &[EventRecord]) -> Markup {
    html! {
        @for event in events {
            (render_card(event))
        }
    }
}
