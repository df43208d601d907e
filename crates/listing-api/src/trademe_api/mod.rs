//! Client for the Trade Me latest-listings endpoint.
//!
//! See https://developer.trademe.co.nz/api-reference/listing-methods/retrieve-latest-listings

pub mod auth;
pub mod live;
pub mod protocol;

pub const LATEST_LISTINGS_URL: &str = "https://api.tmsandbox.co.nz/v1/listings/latest.json";

/// Only a single page is ever requested.
pub const PAGE_SIZE: u32 = 20;
pub const PHOTO_SIZE: &str = "FullSize";
/// Most recently listed first.
pub const SORT_ORDER: &str = "ExpiryDesc";
