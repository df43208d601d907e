mod config;
mod render;

extern crate dotenv;

use std::sync::Arc;

use discover_common::telemetry::{setup_telemetry, teardown_telemetry};
use listing_api::{
    Credentials, FixtureListingSource, ListingSource, ListingStore, LiveListingSource,
};
use tracing::info;

use crate::{
    config::{Configuration, SourceKind},
    render::render_state,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    setup_telemetry("discover")?;

    let config = Configuration::from_env()?;
    info!("Chosen configuration: {:#?}", config);

    let source = setup_source(&config)?;
    let store = Arc::new(ListingStore::new(source).await);
    println!("{}", render_state(&store.state()));

    if let Some(interval) = config.refresh_interval {
        watch_feed(store, interval).await;
    }

    teardown_telemetry();

    Ok(())
}

fn setup_source(
    config: &Configuration,
) -> Result<Arc<dyn ListingSource>, Box<dyn std::error::Error>> {
    let source: Arc<dyn ListingSource> = match config.source {
        SourceKind::Live => Arc::new(LiveListingSource::new(
            &config.listings_url,
            Credentials::new(config.consumer_key.clone(), config.consumer_secret.clone()),
        )?),
        SourceKind::Fixture => Arc::new(FixtureListingSource::default()),
    };
    info!("Using listing source {:?}", config.source);

    Ok(source)
}

/// Re-fetches on every tick and renders each state change until Ctrl-C.
async fn watch_feed(store: Arc<ListingStore>, interval: std::time::Duration) {
    let mut rx = store.subscribe();
    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal detected. Shutting down gracefully.");
                break;
            }
            _ = ticker.tick() => {
                store.refresh();
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                println!("{}", render_state(&state));
            }
        }
    }
}
