use std::fmt::{Debug, Display};

const LIMIT: usize = 7;
const SHOW: usize = 3;

#[derive(Clone, Eq, PartialEq)]
/// Hide secrets from debug and display output.
/// Shows the first 3 characters and then replaces the rest with * if the secret is longer than 7 characters.
pub struct SecretString {
    inner: String,
}

impl SecretString {
    pub fn new(s: String) -> Self {
        Self { inner: s }
    }

    pub fn expose(&self) -> &str {
        &self.inner
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s.to_owned())
    }
}

fn format_secret(secret: &str) -> String {
    secret
        .chars()
        .enumerate()
        .map(|(i, c)| if i < SHOW { c } else { '*' })
        .collect()
}

impl Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.inner.chars().count() > LIMIT {
            f.write_str(&format_secret(&self.inner))
        } else {
            f.write_str("[redacted]")
        }
    }
}

impl Display for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}
