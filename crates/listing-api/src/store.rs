//! Observable holder of the discover feed state.
//!
//! Presentation layers call [`ListingStore::subscribe`] and receive every state change on
//! whichever task they await the receiver from.
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{listing::Listing, source::ListingSource};

#[derive(Debug, Clone, PartialEq)]
pub enum AlertKind {
    ItemDetail(Listing),
    Search,
    Cart,
    NetworkError(String),
}

impl AlertKind {
    pub fn title(&self) -> &str {
        match self {
            AlertKind::ItemDetail(listing) => listing.title.as_deref().unwrap_or("Listing"),
            AlertKind::Search => "Search",
            AlertKind::Cart => "Cart",
            AlertKind::NetworkError(_) => "Network Error",
        }
    }

    pub fn message(&self) -> String {
        match self {
            AlertKind::ItemDetail(listing) => format!(
                "Price: {}\nLocation: {}",
                listing.display_price(),
                listing.display_region()
            ),
            AlertKind::Search => "Search placeholder".into(),
            AlertKind::Cart => "Cart placeholder".into(),
            AlertKind::NetworkError(message) => message.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoverState {
    pub listings: Vec<Listing>,
    pub alert: Option<AlertKind>,
}

/// Holds the current listings and alert and republishes every change.
///
/// Each fetch is tagged with a generation number. A response is only applied if no fetch was
/// started after it, so a slow older response can never overwrite a newer one.
pub struct ListingStore {
    source: Arc<dyn ListingSource>,
    state: watch::Sender<DiscoverState>,
    generation: AtomicU64,
}

impl std::fmt::Debug for ListingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingStore")
            .field("source", &self.source)
            .field("state", &*self.state.borrow())
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish()
    }
}

impl ListingStore {
    fn with_source(source: Arc<dyn ListingSource>) -> Self {
        let (state, _) = watch::channel(DiscoverState::default());
        Self {
            source,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Creates the store and waits for its initial fetch.
    pub async fn new(source: Arc<dyn ListingSource>) -> Self {
        let store = Self::with_source(source);
        store.fetch_listings().await;
        store
    }

    /// Creates the store and starts its initial fetch in the background. Must be called from
    /// within a tokio runtime.
    pub fn spawn(source: Arc<dyn ListingSource>) -> (Arc<Self>, JoinHandle<()>) {
        let store = Arc::new(Self::with_source(source));
        let handle = store.refresh();
        (store, handle)
    }

    /// Runs one fetch and applies its outcome: listings are replaced on success, cleared on
    /// failure together with a network error alert.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_listings(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.source.fetch_listings().await;

        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }

            match &result {
                Ok(listings) => state.listings = listings.clone(),
                Err(e) => {
                    state.listings.clear();
                    state.alert = Some(AlertKind::NetworkError(e.to_string()));
                }
            }
            true
        });

        match (applied, result) {
            (false, _) => debug!(generation, "Discarding stale listings response"),
            (true, Ok(listings)) => info!("Fetched {} listings", listings.len()),
            (true, Err(e)) => warn!("Fetching listings failed: {}", e),
        }
    }

    /// Starts a fetch on the runtime without waiting for it.
    pub fn refresh(self: &Arc<Self>) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move { store.fetch_listings().await })
    }

    pub fn subscribe(&self) -> watch::Receiver<DiscoverState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> DiscoverState {
        self.state.borrow().clone()
    }

    pub fn listings(&self) -> Vec<Listing> {
        self.state.borrow().listings.clone()
    }

    pub fn alert(&self) -> Option<AlertKind> {
        self.state.borrow().alert.clone()
    }

    pub fn select_listing(&self, listing: Listing) {
        self.present(AlertKind::ItemDetail(listing));
    }

    pub fn present(&self, alert: AlertKind) {
        self.state.send_modify(|state| state.alert = Some(alert));
    }

    pub fn dismiss_alert(&self) {
        self.state.send_if_modified(|state| state.alert.take().is_some());
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, sync::Mutex};

    use async_trait::async_trait;
    use tokio::sync::oneshot;

    use super::*;
    use crate::{error::ListingError, fixture::FixtureListingSource};

    #[derive(Debug)]
    struct FailingSource;

    #[async_trait]
    impl ListingSource for FailingSource {
        async fn fetch_listings(&self) -> Result<Vec<Listing>, ListingError> {
            Err(ListingError::BadServerResponse("boom".into()))
        }
    }

    /// Each call takes the next queued response and holds it back until its gate opens.
    #[derive(Debug, Default)]
    struct GatedSource {
        queue: Mutex<VecDeque<(oneshot::Receiver<()>, Result<Vec<Listing>, String>)>>,
    }

    impl GatedSource {
        fn push(&self, response: Result<Vec<Listing>, String>) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.queue.lock().unwrap().push_back((rx, response));
            tx
        }
    }

    #[async_trait]
    impl ListingSource for GatedSource {
        async fn fetch_listings(&self) -> Result<Vec<Listing>, ListingError> {
            let (gate, response) = self.queue.lock().unwrap().pop_front().expect("queued response");
            gate.await.expect("gate opened");
            response.map_err(ListingError::BadServerResponse)
        }
    }

    fn listing(id: i64) -> Listing {
        Listing {
            id: Some(id),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fixture_store_has_listings_after_construction() {
        let fixture = FixtureListingSource::new(vec![listing(1), listing(2), listing(3)]);
        let store = ListingStore::new(Arc::new(fixture)).await;

        assert_eq!(store.listings().len(), 3);
        assert_eq!(store.alert(), None);
    }

    #[tokio::test]
    async fn test_failure_clears_listings_and_raises_alert() {
        let store = ListingStore::new(Arc::new(FailingSource)).await;

        assert!(store.listings().is_empty());
        assert_eq!(
            store.alert(),
            Some(AlertKind::NetworkError("boom".into()))
        );
    }

    #[tokio::test]
    async fn test_failure_replaces_previous_listings() {
        let source = Arc::new(GatedSource::default());
        source.push(Ok(vec![listing(1)])).send(()).unwrap();
        let store = ListingStore::new(source.clone()).await;
        assert_eq!(store.listings(), vec![listing(1)]);

        source.push(Err("boom".into())).send(()).unwrap();
        store.fetch_listings().await;
        assert!(store.listings().is_empty());
        assert_eq!(store.alert(), Some(AlertKind::NetworkError("boom".into())));
    }

    #[tokio::test]
    async fn test_success_leaves_alert_untouched() {
        let store = ListingStore::new(Arc::new(FixtureListingSource::default())).await;
        store.present(AlertKind::Cart);

        store.fetch_listings().await;
        assert_eq!(store.alert(), Some(AlertKind::Cart));
    }

    #[tokio::test]
    async fn test_fetch_twice_is_idempotent() {
        let store = ListingStore::new(Arc::new(FixtureListingSource::default())).await;
        let first = store.listings();

        store.fetch_listings().await;
        assert_eq!(store.listings(), first);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let source = Arc::new(GatedSource::default());
        let store = ListingStore::with_source(source.clone());
        let older = source.push(Ok(vec![listing(1)]));
        let newer = source.push(Ok(vec![listing(2)]));

        tokio::join!(store.fetch_listings(), store.fetch_listings(), async {
            newer.send(()).unwrap();
            tokio::task::yield_now().await;
            older.send(()).unwrap();
        });

        assert_eq!(store.listings(), vec![listing(2)]);
    }

    #[tokio::test]
    async fn test_subscribers_are_notified() {
        let (store, handle) = ListingStore::spawn(Arc::new(FixtureListingSource::default()));
        let mut rx = store.subscribe();
        handle.await.unwrap();

        let mut rx_late = store.subscribe();
        assert!(!rx_late.has_changed().unwrap());

        store.select_listing(listing(7));
        rx.changed().await.unwrap();
        rx_late.changed().await.unwrap();
        assert_eq!(
            rx.borrow().alert,
            Some(AlertKind::ItemDetail(listing(7)))
        );
        assert_eq!(rx.borrow().listings.len(), 5);
    }

    #[tokio::test]
    async fn test_dismiss_alert() {
        let store = ListingStore::new(Arc::new(FixtureListingSource::default())).await;
        store.present(AlertKind::Search);
        let mut rx = store.subscribe();

        store.dismiss_alert();
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();
        assert_eq!(store.alert(), None);

        store.dismiss_alert();
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_alert_texts() {
        let item = AlertKind::ItemDetail(Listing {
            title: Some("Espresso machine".into()),
            price_display: Some("$150.00".into()),
            ..Default::default()
        });
        assert_eq!(item.title(), "Espresso machine");
        assert_eq!(item.message(), "Price: $150.00\nLocation: Unknown");

        assert_eq!(AlertKind::ItemDetail(Listing::default()).title(), "Listing");
        assert_eq!(AlertKind::Cart.message(), "Cart placeholder");
        assert_eq!(AlertKind::NetworkError("boom".into()).title(), "Network Error");
        assert_eq!(AlertKind::NetworkError("boom".into()).message(), "boom");
    }
}
