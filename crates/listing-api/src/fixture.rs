use async_trait::async_trait;

use crate::{
    error::ListingError,
    listing::{Listing, ReserveState},
    source::ListingSource,
};

/// Serves a fixed set of listings without any I/O. Used for previews and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureListingSource {
    listings: Vec<Listing>,
}

impl FixtureListingSource {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }
}

impl Default for FixtureListingSource {
    fn default() -> Self {
        Self::new(sample_listings())
    }
}

#[async_trait]
impl ListingSource for FixtureListingSource {
    async fn fetch_listings(&self) -> Result<Vec<Listing>, ListingError> {
        Ok(self.listings.clone())
    }
}

fn bundled(
    id: i64,
    title: &str,
    region: &str,
    price_display: &str,
    image: &str,
) -> Listing {
    Listing {
        id: Some(id),
        title: Some(title.into()),
        region: Some(region.into()),
        price_display: Some(price_display.into()),
        local_image: Some(image.into()),
        use_local_image: true,
        ..Default::default()
    }
}

/// Canned feed covering classifieds, every reserve state and both image kinds.
pub fn sample_listings() -> Vec<Listing> {
    vec![
        Listing {
            buy_now_price: Some(120.0),
            reserve_state: Some(ReserveState::NoReserve),
            ..bundled(1, "Mountain bike, 21 speed", "Canterbury", "$85.00", "listingImage1")
        },
        Listing {
            reserve_state: Some(ReserveState::ReserveMet),
            ..bundled(2, "Antique rimu sideboard", "Wellington", "$410.00", "listingImage2")
        },
        Listing {
            buy_now_price: Some(59.99),
            reserve_state: Some(ReserveState::ReserveNotMet),
            ..bundled(3, "Noise cancelling headphones", "Auckland", "$35.00", "listingImage3")
        },
        Listing {
            is_classified: true,
            reserve_state: Some(ReserveState::NotApplicable),
            ..bundled(4, "2015 Mazda Demio", "Waikato", "$8,990", "listingImage4")
        },
        Listing {
            id: Some(5),
            title: Some("Espresso machine".into()),
            region: Some("Otago".into()),
            photo_urls: vec!["https://images.tmsandbox.co.nz/photoserver/full/5.jpg".into()],
            price_display: Some("$150.00".into()),
            reserve_state: Some(ReserveState::NoReserve),
            ..Default::default()
        },
    ]
}
