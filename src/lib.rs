pub mod config;
pub mod models;
pub mod page;
pub mod render;
pub mod resolver;
pub mod server;
pub mod source;
mod utils;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::ConfigStore;
use resolver::FeedResolver;
use server::AppState;
use source::HttpTransport;

const DEFAULT_LOG_FILTER: &str = "band_site_lib=info,band_site=info,tower_http=info";

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

pub fn run() -> anyhow::Result<()> {
    init_tracing();

    let config = ConfigStore::load().read();
    tracing::info!(
        use_demo_data = config.use_demo_data,
        fallback_to_demo = config.fallback_to_demo,
        api_url = %config.api_url,
        "loaded site config"
    );

    let state = AppState {
        resolver: FeedResolver::new(config, Arc::new(HttpTransport)),
    };

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(server::serve(state))
}
