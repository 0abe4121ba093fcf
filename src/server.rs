use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{Datelike, Local};
use maud::Markup;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{EVENTS_REGION_PATH, INDEX_PATH};
use crate::models::EventRecord;
use crate::page::{render_events_region, render_page, PageView};
use crate::resolver::FeedResolver;

pub struct AppState {
    pub resolver: FeedResolver,
}

#[derive(Debug, Serialize)]
struct EventsBody<'a> {
    events: &'a [EventRecord],
}

pub fn router(state: AppState) -> Router {
    let api = Router::new().route("/api/events", get(api_events)).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET]),
    );

    Router::new()
        .route(INDEX_PATH, get(index))
        .route(EVENTS_REGION_PATH, get(events_region))
        .merge(api)
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let addr = state.resolver.config().listen_addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "band site listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn api_events(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let config = state.resolver.config();
    let cache_control = format!("s-maxage={}", config.cache_max_age_secs);
    (
        [(header::CACHE_CONTROL, cache_control)],
        Json(EventsBody {
            events: &config.published_events,
        }),
    )
        .into_response()
}

async fn index(State(state): State<Arc<AppState>>) -> Markup {
    let view = PageView::loading().finish(&state.resolver.resolve().await);
    render_page(state.resolver.config(), &view, Local::now().year())
}

async fn events_region(State(state): State<Arc<AppState>>) -> Markup {
    let view = PageView::loading().finish(&state.resolver.resolve().await);
    render_events_region(&state.resolver.config().regions, &view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::source::testing::ScriptedTransport;
    use crate::source::HttpTransport;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use scraper::{Html as Document, Selector};
    use tower::ServiceExt;

    fn app(config: SiteConfig) -> Router {
        router(AppState {
            resolver: FeedResolver::new(config, Arc::new(ScriptedTransport::status(500, ""))),
        })
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn card_count(html: &str) -> usize {
        let selector = Selector::parse("article.event-card").unwrap();
        Document::parse_document(html).select(&selector).count()
    }

    #[tokio::test]
    async fn api_events_sets_cors_and_cache_headers() {
        let request = Request::builder()
            .uri("/api/events")
            .header(header::ORIGIN, "https://fans.example.com")
            .body(Body::empty())
            .unwrap();
        let response = app(SiteConfig::default()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "s-maxage=300");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let events = body["events"].as_array().expect("events wrapper");
        assert_eq!(events.len(), 3);
        assert_eq!(events[0]["ticketUrl"], "https://planetaryband.com");
        assert_eq!(events[2]["ticketUrl"], serde_json::Value::Null);
        assert_eq!(events[2]["isFree"], true);
    }

    #[tokio::test]
    async fn index_renders_demo_feed_and_year() {
        let (status, html) = get_body(app(SiteConfig::default()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(card_count(&html), 3);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(&format!(
            r#"<span id="currentYear">{}</span>"#,
            Local::now().year()
        )));
    }

    #[tokio::test]
    async fn events_region_shows_error_panel_when_nothing_to_show() {
        let config = SiteConfig {
            use_demo_data: false,
            demo_events: Vec::new(),
            ..SiteConfig::default()
        };
        let (status, html) = get_body(app(config), "/events").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(card_count(&html), 0);
        let panel = Selector::parse("#eventsError").unwrap();
        let document = Document::parse_fragment(&html);
        let error = document.select(&panel).next().expect("error panel");
        assert_eq!(error.value().attr("style"), None);
        assert!(html.contains(r#"href="/events""#));
        assert!(!html.contains("<html"));
    }

    #[tokio::test]
    async fn live_feed_round_trips_through_own_endpoint() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let publisher = app(SiteConfig::default());
        tokio::spawn(async move {
            axum::serve(listener, publisher).await.unwrap();
        });

        let config = SiteConfig {
            listen_addr: addr,
            use_demo_data: false,
            demo_events: Vec::new(),
            ..SiteConfig::default()
        };
        let site = router(AppState {
            resolver: FeedResolver::new(config, Arc::new(HttpTransport)),
        });

        let (status, html) = get_body(site, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(card_count(&html), 3);
        assert!(html.contains(r#"href="https://planetaryband.com""#));
        assert!(html.contains("Free Event"));
    }
}
