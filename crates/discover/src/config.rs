use std::{fmt::Display, time::Duration};

use discover_common::{
    env::{read_int_from_env, string_from_env_or},
    secret::SecretString,
};
use listing_api::trademe_api::{auth::MISSING_CREDENTIAL, LATEST_LISTINGS_URL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Live,
    Fixture,
}

impl SourceKind {
    fn from_env() -> Result<SourceKind, ConfigError> {
        let value = string_from_env_or("LISTING_SOURCE", "live");

        match value.to_lowercase().as_str() {
            "live" => Ok(SourceKind::Live),
            "fixture" | "mock" => Ok(SourceKind::Fixture),
            _ => Err(ConfigError(format!("Unknown LISTING_SOURCE {value}"))),
        }
    }
}

#[derive(Debug)]
pub struct ConfigError(String);

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Configuration {
    pub source: SourceKind,
    pub listings_url: String,
    pub consumer_key: SecretString,
    pub consumer_secret: SecretString,
    /// Re-fetch the feed at this interval until interrupted. Unset means fetch once.
    pub refresh_interval: Option<Duration>,
}

impl Configuration {
    pub fn from_env() -> Result<Configuration, ConfigError> {
        let refresh_interval = read_int_from_env("DISCOVER_REFRESH_SECS")
            .map_err(|e| ConfigError(format!("DISCOVER_REFRESH_SECS: {e}")))?
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Ok(Configuration {
            source: SourceKind::from_env()?,
            listings_url: string_from_env_or("TRADEME_LISTINGS_URL", LATEST_LISTINGS_URL),
            consumer_key: SecretString::new(string_from_env_or(
                "TRADEME_CONSUMER_KEY",
                MISSING_CREDENTIAL,
            )),
            consumer_secret: SecretString::new(string_from_env_or(
                "TRADEME_CONSUMER_SECRET",
                MISSING_CREDENTIAL,
            )),
            refresh_interval,
        })
    }
}
