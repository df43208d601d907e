/// Everything that can go wrong while fetching the latest listings.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    /// The request could not be built, which points at a configuration bug.
    #[error("Invalid listings URL: {0}")]
    BadUrl(String),

    #[error("Authentication required")]
    AuthenticationRequired,

    /// Any non-success status other than 401. Displays as the bare message.
    #[error("{0}")]
    BadServerResponse(String),

    #[error("Could not decode listings response: {0}")]
    Decoding(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] reqwest_middleware::Error),
}

impl From<reqwest::Error> for ListingError {
    fn from(e: reqwest::Error) -> Self {
        ListingError::Transport(reqwest_middleware::Error::Reqwest(e))
    }
}
