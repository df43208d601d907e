pub mod error;
pub mod fixture;
pub mod listing;
pub mod source;
pub mod store;
pub mod trademe_api;

pub use error::ListingError;
pub use fixture::FixtureListingSource;
pub use listing::{ImageSource, Listing, ReserveState};
pub use source::ListingSource;
pub use store::{AlertKind, DiscoverState, ListingStore};
pub use trademe_api::{auth::Credentials, live::LiveListingSource};
