use discover_common::secret::SecretString;

/// Substituted for a credential that is missing from the configuration. The request still goes
/// out and the API answers with 401.
pub const MISSING_CREDENTIAL: &str = "Not Found";

pub const SIGNATURE_METHOD: &str = "PLAINTEXT";

/// Consumer key and secret of the registered application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: SecretString,
    pub consumer_secret: SecretString,
}

impl Credentials {
    pub fn new(consumer_key: SecretString, consumer_secret: SecretString) -> Self {
        Self {
            consumer_key,
            consumer_secret,
        }
    }

    /// The `Authorization` header value. With the PLAINTEXT method the signature is just the
    /// consumer secret followed by `&` (no token secret), so there is no nonce or timestamp and
    /// the value is the same for every request.
    pub fn authorization_header(&self) -> String {
        format!(
            "OAuth oauth_consumer_key=\"{}\", oauth_signature_method=\"{}\", oauth_signature=\"{}&\"",
            self.consumer_key.expose(),
            SIGNATURE_METHOD,
            self.consumer_secret.expose()
        )
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(MISSING_CREDENTIAL.into(), MISSING_CREDENTIAL.into())
    }
}
