use async_trait::async_trait;
use discover_common::{telemetry::generate_http_client, ClientWithMiddleware};
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    StatusCode, Url,
};
use tracing::{debug, error};

use super::{
    auth::Credentials, protocol::decode_latest_listings, PAGE_SIZE, PHOTO_SIZE, SORT_ORDER,
};
use crate::{error::ListingError, listing::Listing, source::ListingSource};

/// Fetches the latest listings from the Trade Me API.
#[derive(Clone)]
pub struct LiveListingSource {
    client: ClientWithMiddleware,
    url: Url,
    credentials: Credentials,
}

impl std::fmt::Debug for LiveListingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveListingSource")
            .field("url", &self.url.as_str())
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl LiveListingSource {
    pub fn new(endpoint: &str, credentials: Credentials) -> Result<Self, ListingError> {
        Self::with_client(generate_http_client()?, endpoint, credentials)
    }

    pub fn with_client(
        client: ClientWithMiddleware,
        endpoint: &str,
        credentials: Credentials,
    ) -> Result<Self, ListingError> {
        Ok(Self {
            client,
            url: latest_listings_url(endpoint)?,
            credentials,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn request(&self) -> Result<Vec<Listing>, ListingError> {
        debug!("Requesting latest listings");

        let response = self
            .client
            .get(self.url.clone())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(AUTHORIZATION, self.credentials.authorization_header())
            .send()
            .await?;

        check_status(response.status())?;

        let bytes = response.bytes().await?;
        let listings = decode_latest_listings(&bytes)?;
        debug!("Read response with {} listings", listings.len());

        Ok(listings)
    }
}

#[async_trait]
impl ListingSource for LiveListingSource {
    async fn fetch_listings(&self) -> Result<Vec<Listing>, ListingError> {
        self.request().await.map_err(|e| {
            error!("Network error: {}", e);
            e
        })
    }
}

/// Appends the fixed paging, photo size and sort parameters to `endpoint`.
pub fn latest_listings_url(endpoint: &str) -> Result<Url, ListingError> {
    let mut url =
        Url::parse(endpoint).map_err(|e| ListingError::BadUrl(format!("{endpoint}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ListingError::BadUrl(format!(
            "{endpoint}: unsupported scheme {}",
            url.scheme()
        )));
    }

    url.query_pairs_mut()
        .append_pair("photo_size", PHOTO_SIZE)
        .append_pair("rows", &PAGE_SIZE.to_string())
        .append_pair("sort_order", SORT_ORDER);

    Ok(url)
}

/// Only 200 is a success, 401 means the credentials were rejected.
pub fn check_status(status: StatusCode) -> Result<(), ListingError> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::UNAUTHORIZED => Err(ListingError::AuthenticationRequired),
        other => Err(ListingError::BadServerResponse(format!(
            "Unexpected response status {other}"
        ))),
    }
}
