//! The display model for a single marketplace listing.

/// Text shown in place of a missing title, region or price.
pub const UNKNOWN: &str = "Unknown";

/// A single item summary shown in the discover feed.
///
/// Everything except `photo_urls` and `is_classified` may be missing, since the upstream API
/// does not guarantee to populate them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub region: Option<String>,
    pub photo_urls: Vec<String>,
    /// Fixed-price listing, shown with its price on the right and no reserve annotation
    pub is_classified: bool,
    /// Fallback image when `photo_urls` is empty
    pub picture_href: Option<String>,
    pub price_display: Option<String>,
    pub buy_now_price: Option<f64>,
    pub reserve_state: Option<ReserveState>,
    /// Name of a bundled image, only set by the fixture source
    pub local_image: Option<String>,
    pub use_local_image: bool,
}

/// Auction reserve-price status as reported by the `ReserveState` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveState {
    NoReserve,
    ReserveMet,
    ReserveNotMet,
    NotApplicable,
    Other(i64),
}

impl From<i64> for ReserveState {
    fn from(code: i64) -> Self {
        match code {
            0 => ReserveState::NoReserve,
            1 => ReserveState::ReserveMet,
            2 => ReserveState::ReserveNotMet,
            4 => ReserveState::NotApplicable,
            other => ReserveState::Other(other),
        }
    }
}

impl ReserveState {
    pub fn code(&self) -> i64 {
        match self {
            ReserveState::NoReserve => 0,
            ReserveState::ReserveMet => 1,
            ReserveState::ReserveNotMet => 2,
            ReserveState::NotApplicable => 4,
            ReserveState::Other(code) => *code,
        }
    }
}

/// Where the primary image of a listing comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    Remote(&'a str),
    Bundled(&'a str),
}

impl Listing {
    /// First photo, then `picture_href`, then the bundled image if the listing opts into it.
    /// `None` means the presentation layer shows its placeholder.
    pub fn primary_image(&self) -> Option<ImageSource<'_>> {
        if let Some(url) = self.photo_urls.first().or(self.picture_href.as_ref()) {
            return Some(ImageSource::Remote(url));
        }

        match (self.use_local_image, &self.local_image) {
            (true, Some(name)) => Some(ImageSource::Bundled(name)),
            _ => None,
        }
    }

    /// Caption under the price of an auction. `None` means the caption is hidden entirely,
    /// which is the case for classifieds and for reserve state 4 (not applicable).
    pub fn reserve_label(&self) -> Option<&'static str> {
        if self.is_classified {
            return None;
        }

        match self.reserve_state {
            Some(ReserveState::NotApplicable) => None,
            Some(ReserveState::NoReserve) => Some("No Reserve"),
            Some(ReserveState::ReserveMet) => Some("Reserve Met"),
            Some(ReserveState::ReserveNotMet) => Some("Reserve Not Met"),
            Some(ReserveState::Other(_)) | None => Some(""),
        }
    }

    pub fn buy_now_label(&self) -> Option<String> {
        self.buy_now_price.map(|price| format!("${price:.2}"))
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn display_region(&self) -> &str {
        self.region.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn display_price(&self) -> &str {
        self.price_display.as_deref().unwrap_or(UNKNOWN)
    }
}
