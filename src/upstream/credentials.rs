//! OAuth 1.0a credential loading.
//!
//! # Security
//! - Secrets are loaded ONLY from environment variables
//! - Secrets are never logged or serialized

use std::fmt;

use reqwest_oauth1::Secrets;

/// Environment variable holding the consumer (API) key.
pub const CONSUMER_KEY_ENV: &str = "TWITTER_API_KEY";
/// Environment variable holding the consumer (API) key secret.
pub const CONSUMER_SECRET_ENV: &str = "TWITTER_API_KEY_SECRET";
/// Environment variable holding the access token.
pub const ACCESS_TOKEN_ENV: &str = "TWITTER_ACCESS_TOKEN";
/// Environment variable holding the access token secret.
pub const ACCESS_TOKEN_SECRET_ENV: &str = "TWITTER_ACCESS_TOKEN_SECRET";

/// The four strings used to sign every outbound request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    access_token: String,
    access_token_secret: String,
}

impl Credentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
        }
    }

    /// Load credentials from the process environment.
    ///
    /// Unset variables become empty strings; the upstream rejects the
    /// resulting signature rather than the relay refusing to start.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).unwrap_or_default();
        let credentials = Self {
            consumer_key: read(CONSUMER_KEY_ENV),
            consumer_secret: read(CONSUMER_SECRET_ENV),
            access_token: read(ACCESS_TOKEN_ENV),
            access_token_secret: read(ACCESS_TOKEN_SECRET_ENV),
        };

        let missing = credentials.missing();
        if !missing.is_empty() {
            tracing::warn!(
                missing = ?missing,
                "Credential variables unset; upstream calls will fail authorization"
            );
        }

        credentials
    }

    /// Names of the environment variables whose values are empty.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (CONSUMER_KEY_ENV, &self.consumer_key),
            (CONSUMER_SECRET_ENV, &self.consumer_secret),
            (ACCESS_TOKEN_ENV, &self.access_token),
            (ACCESS_TOKEN_SECRET_ENV, &self.access_token_secret),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// One-legged signing secrets for a single request.
    pub(crate) fn secrets(&self) -> Secrets<'_> {
        Secrets::new(self.consumer_key.as_str(), self.consumer_secret.as_str())
            .token(self.access_token.as_str(), self.access_token_secret.as_str())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &"[redacted]")
            .field("consumer_secret", &"[redacted]")
            .field("access_token", &"[redacted]")
            .field("access_token_secret", &"[redacted]")
            .finish()
    }
}
