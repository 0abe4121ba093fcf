use std::{fs, net::SocketAddr, path::Path};

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::models::{EventRecord, TICKET_PLACEHOLDER};
use crate::page::DisplayRegions;
use crate::utils;

pub const DEFAULT_API_PATH: &str = "/api/events";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_CACHE_MAX_AGE_SECS: u32 = 300;
pub const INDEX_PATH: &str = "/";
pub const EVENTS_REGION_PATH: &str = "/events";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub site_title: String,
    pub listen_addr: SocketAddr,
    /// Events endpoint; a path is resolved against `listen_addr`.
    pub api_url: String,
    pub use_demo_data: bool,
    pub fallback_to_demo: bool,
    pub demo_events: Vec<EventRecord>,
    /// What `/api/events` serves.
    pub published_events: Vec<EventRecord>,
    pub cache_max_age_secs: u32,
    pub regions: DisplayRegions,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "Jetcapriest".to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 3000))),
            api_url: DEFAULT_API_PATH.to_string(),
            // Flip to false once the live endpoint carries real dates.
            use_demo_data: true,
            fallback_to_demo: true,
            demo_events: default_demo_events(),
            published_events: default_published_events(),
            cache_max_age_secs: DEFAULT_CACHE_MAX_AGE_SECS,
            regions: DisplayRegions::default(),
        }
    }
}

impl SiteConfig {
    /// Fails for URLs naming one of this site's own rendered pages, which
    /// would resolve the feed by fetching themselves.
    pub fn absolute_api_url(&self) -> Result<Url, String> {
        let api_url = self.api_url.trim();
        let base = Url::parse(&format!("http://{}/", self.listen_addr))
            .map_err(|err| format!("invalid listen_addr {}: {err}", self.listen_addr))?;
        let url = if api_url.starts_with("http://") || api_url.starts_with("https://") {
            Url::parse(api_url)
        } else {
            base.join(api_url)
        }
        .map_err(|err| format!("invalid api_url {api_url}: {err}"))?;

        let same_origin = url.host() == base.host() && url.port_or_known_default() == base.port();
        if same_origin && [INDEX_PATH, EVENTS_REGION_PATH].contains(&url.path()) {
            return Err(format!("api_url {api_url} points at a rendered page"));
        }
        Ok(url)
    }
}

pub struct ConfigStore {
    data: SiteConfig,
}

impl ConfigStore {
    pub fn load() -> Self {
        let path = utils::config_path();
        let data = match read_config(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), "config unreadable, using defaults: {err}");
                SiteConfig::default()
            }
        };
        Self { data }
    }

    pub fn read(&self) -> SiteConfig {
        self.data.clone()
    }
}

pub fn read_config(path: &Path) -> Result<SiteConfig, String> {
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    let contents = fs::read_to_string(path).map_err(|err| err.to_string())?;
    serde_json::from_str(&contents).map_err(|err| err.to_string())
}

pub fn default_demo_events() -> Vec<EventRecord> {
    let mut events = default_published_events();
    for event in events.iter_mut() {
        if event.ticket_url.is_some() {
            event.ticket_url = Some(TICKET_PLACEHOLDER.to_string());
        }
    }
    events
}

pub fn default_published_events() -> Vec<EventRecord> {
    vec![
        show(
            "1",
            "Sat, Mar 15, 2026",
            "8:00 PM",
            "Crossroads Chantilly",
            "Chantilly",
            Some("https://planetaryband.com"),
        ),
        show(
            "2",
            "Fri, Mar 28, 2026",
            "9:00 PM",
            "The Blue Note Lounge",
            "Arlington",
            Some("https://planetaryband.com"),
        ),
        EventRecord {
            is_free: Some(true),
            ..show(
                "3",
                "Sat, Apr 12, 2026",
                "7:30 PM",
                "Faith Community Church",
                "Fairfax",
                None,
            )
        },
    ]
}

fn show(
    id: &str,
    date: &str,
    time: &str,
    venue: &str,
    city: &str,
    ticket_url: Option<&str>,
) -> EventRecord {
    EventRecord {
        id: id.to_string(),
        date: date.to_string(),
        time: Some(time.to_string()),
        venue: venue.to_string(),
        city: Some(city.to_string()),
        state: Some("VA".to_string()),
        ticket_url: ticket_url.map(str::to_string),
        price: None,
        is_free: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = read_config(&dir.path().join("absent.json")).expect("defaults");
        assert_eq!(config, SiteConfig::default());
        assert!(config.use_demo_data);
        assert!(config.fallback_to_demo);
        assert_eq!(config.demo_events.len(), 3);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"use_demo_data": false, "api_url": "https://example.com/api/events", "demo_events": []}}"#
        )
        .expect("write config");

        let config = read_config(file.path()).expect("parse config");
        assert!(!config.use_demo_data);
        assert!(config.fallback_to_demo);
        assert!(config.demo_events.is_empty());
        assert_eq!(config.published_events.len(), 3);
        assert_eq!(config.cache_max_age_secs, 300);
        assert_eq!(config.regions, DisplayRegions::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{ not json").expect("write config");
        assert!(read_config(file.path()).is_err());
    }

    #[test]
    fn relative_api_url_resolves_against_listen_addr() {
        let config = SiteConfig::default();
        let url = config.absolute_api_url().expect("url");
        assert_eq!(url.as_str(), "http://127.0.0.1:3000/api/events");

        let remote = SiteConfig {
            api_url: "https://shows.example.com/api/events".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(
            remote.absolute_api_url().expect("url").as_str(),
            "https://shows.example.com/api/events"
        );
    }

    #[test]
    fn api_url_cannot_point_at_rendered_pages() {
        for api_url in ["/", "/events", "", "http://127.0.0.1:3000/events"] {
            let config = SiteConfig {
                api_url: api_url.to_string(),
                ..SiteConfig::default()
            };
            assert!(
                config.absolute_api_url().is_err(),
                "{api_url:?} should be rejected"
            );
        }

        let elsewhere = SiteConfig {
            api_url: "https://shows.example.com/events".to_string(),
            ..SiteConfig::default()
        };
        assert!(elsewhere.absolute_api_url().is_ok());
    }

    #[test]
    fn demo_events_use_ticket_placeholder() {
        let demo = default_demo_events();
        assert_eq!(demo[0].ticket_url.as_deref(), Some("#"));
        assert_eq!(demo[2].ticket_url, None);
        assert_eq!(demo[2].is_free, Some(true));

        let published = default_published_events();
        assert!(published[0].has_tickets());
    }
}
