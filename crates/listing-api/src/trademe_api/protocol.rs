//! Internal types that model what the data coming from the latest-listings endpoint looks like.
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use tracing::debug;

use crate::{
    error::ListingError,
    listing::{Listing, ReserveState},
};

/// Top-level response body. `List` is the only field that has to be present.
#[derive(Debug, Deserialize)]
pub struct LatestListingsResponse {
    #[serde(rename(deserialize = "List"))]
    pub list: Vec<serde_json::Value>,
}

/// A single entry of `List`. Fields that are missing, `null` or of an unexpected type are
/// decoded as `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListingRecord {
    #[serde(rename(deserialize = "ListingId"), default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(rename(deserialize = "Title"), default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(rename(deserialize = "Region"), default, deserialize_with = "lenient")]
    pub region: Option<String>,
    #[serde(rename(deserialize = "PhotoUrls"), default, deserialize_with = "lenient")]
    pub photo_urls: Option<Vec<String>>,
    #[serde(rename(deserialize = "IsClassified"), default, deserialize_with = "lenient")]
    pub is_classified: Option<bool>,
    #[serde(rename(deserialize = "PictureHref"), default, deserialize_with = "lenient")]
    pub picture_href: Option<String>,
    #[serde(rename(deserialize = "PriceDisplay"), default, deserialize_with = "lenient")]
    pub price_display: Option<String>,
    #[serde(rename(deserialize = "BuyNowPrice"), default, deserialize_with = "lenient")]
    pub buy_now_price: Option<f64>,
    #[serde(rename(deserialize = "ReserveState"), default, deserialize_with = "lenient")]
    pub reserve_state: Option<i64>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

impl ListingRecord {
    /// Best-effort decode of one entry. An entry that is not even an object yields an empty
    /// record instead of failing the whole page.
    pub fn from_value(value: serde_json::Value) -> Self {
        ListingRecord::deserialize(value).unwrap_or_else(|e| {
            debug!("Skipping malformed listing entry: {}", e);
            ListingRecord::default()
        })
    }
}

impl From<ListingRecord> for Listing {
    fn from(record: ListingRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            region: record.region,
            photo_urls: record.photo_urls.unwrap_or_default(),
            is_classified: record.is_classified.unwrap_or(false),
            picture_href: record.picture_href,
            price_display: record.price_display,
            buy_now_price: record.buy_now_price,
            reserve_state: record.reserve_state.map(ReserveState::from),
            local_image: None,
            use_local_image: false,
        }
    }
}

/// Decodes a latest-listings body into listings, keeping the upstream order.
pub fn decode_latest_listings(bytes: &[u8]) -> Result<Vec<Listing>, ListingError> {
    let response = serde_json::from_slice::<LatestListingsResponse>(bytes)?;

    Ok(response
        .list
        .into_iter()
        .map(ListingRecord::from_value)
        .map(Listing::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESPONSE: &str = r#"{
        "TotalCount": 2,
        "Page": 1,
        "PageSize": 20,
        "List": [
            {
                "ListingId": 2149286940,
                "Title": "Vintage brass compass",
                "Region": "Wellington",
                "PhotoUrls": ["https://images.tmsandbox.co.nz/photoserver/full/1.jpg"],
                "IsClassified": false,
                "PictureHref": "https://images.tmsandbox.co.nz/photoserver/thumb/1.jpg",
                "PriceDisplay": "$25.00",
                "BuyNowPrice": 40.0,
                "ReserveState": 1,
                "Category": "0187-"
            },
            {
                "ListingId": 2149286941,
                "Title": "2012 Toyota Corolla",
                "IsClassified": true,
                "PriceDisplay": "$9,500"
            }
        ]
    }"#;

    #[test]
    fn test_decode_full_response() {
        let listings = decode_latest_listings(FULL_RESPONSE.as_bytes()).unwrap();
        assert_eq!(listings.len(), 2);

        let first = &listings[0];
        assert_eq!(first.id, Some(2149286940));
        assert_eq!(first.title.as_deref(), Some("Vintage brass compass"));
        assert_eq!(first.region.as_deref(), Some("Wellington"));
        assert_eq!(first.photo_urls.len(), 1);
        assert!(!first.is_classified);
        assert_eq!(first.buy_now_price, Some(40.0));
        assert_eq!(first.reserve_state, Some(ReserveState::ReserveMet));
        assert!(!first.use_local_image);

        let second = &listings[1];
        assert!(second.is_classified);
        assert!(second.photo_urls.is_empty());
        assert_eq!(second.region, None);
        assert_eq!(second.reserve_state, None);
    }

    #[test]
    fn test_decode_empty_list() {
        let listings = decode_latest_listings(br#"{"List": []}"#).unwrap();
        assert!(listings.is_empty());
    }

    #[test]
    fn test_decode_entry_without_any_fields() {
        let listings = decode_latest_listings(br#"{"List": [{}]}"#).unwrap();
        assert_eq!(listings, vec![Listing::default()]);
    }

    #[test]
    fn test_decode_tolerates_nulls_and_wrong_types() {
        let body = br#"{"List": [{
            "ListingId": "not a number",
            "Title": null,
            "PhotoUrls": null,
            "IsClassified": "yes",
            "BuyNowPrice": 12
        }]}"#;
        let listings = decode_latest_listings(body).unwrap();
        let listing = &listings[0];
        assert_eq!(listing.id, None);
        assert_eq!(listing.title, None);
        assert!(listing.photo_urls.is_empty());
        assert!(!listing.is_classified);
        assert_eq!(listing.buy_now_price, Some(12.0));
    }

    #[test]
    fn test_decode_keeps_upstream_order() {
        let body = br#"{"List": [{"ListingId": 3}, {"ListingId": 1}, {"ListingId": 2}]}"#;
        let ids = decode_latest_listings(body)
            .unwrap()
            .into_iter()
            .map(|l| l.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![Some(3), Some(1), Some(2)]);
    }

    #[test]
    fn test_decode_non_object_entry_is_empty_record() {
        let listings = decode_latest_listings(br#"{"List": [42, {"Title": "Chair"}]}"#).unwrap();
        assert_eq!(listings[0], Listing::default());
        assert_eq!(listings[1].title.as_deref(), Some("Chair"));
    }

    #[test]
    fn test_decode_missing_list_fails() {
        let result = decode_latest_listings(br#"{"TotalCount": 0}"#);
        assert!(matches!(result, Err(ListingError::Decoding(_))));
    }

    #[test]
    fn test_decode_list_not_an_array_fails() {
        let result = decode_latest_listings(br#"{"List": {"ListingId": 1}}"#);
        assert!(matches!(result, Err(ListingError::Decoding(_))));
    }

    #[test]
    fn test_decode_invalid_json_fails() {
        let result = decode_latest_listings(b"<html>Service Unavailable</html>");
        assert!(matches!(result, Err(ListingError::Decoding(_))));
    }
}
