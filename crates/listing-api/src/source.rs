use async_trait::async_trait;

use crate::{error::ListingError, listing::Listing};

/// Anything that can produce the current page of listings.
///
/// The live and fixture sources are interchangeable behind this trait, so the store and the
/// binary pick one at runtime instead of at compile time.
#[async_trait]
pub trait ListingSource: Send + Sync + std::fmt::Debug {
    /// Listings in the order the upstream delivered them.
    async fn fetch_listings(&self) -> Result<Vec<Listing>, ListingError>;
}
