//! Credential types
//!
//! The tenant access token is the only credential the client holds. It is
//! replaced wholesale on every refresh and read once per request.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A bearer token and the moment it was issued to us
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    token: String,
    obtained_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Wrap a freshly obtained token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            obtained_at: Some(Utc::now()),
        }
    }

    /// The raw token string (empty before the first successful authentication)
    pub fn token(&self) -> &str {
        &self.token
    }

    /// When the token was obtained, `None` if never
    pub fn obtained_at(&self) -> Option<DateTime<Utc>> {
        self.obtained_at
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }

    /// Time elapsed since the token was obtained
    pub fn age(&self) -> Option<chrono::Duration> {
        self.obtained_at.map(|at| Utc::now() - at)
    }
}

// Never print the token itself.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &if self.token.is_empty() { "" } else { "<redacted>" })
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}

/// Shared slot holding the current credential
///
/// One writer (the token manager) replaces the whole value; readers clone
/// it out under a read lock, so a request that already captured a token
/// keeps using it even if a refresh lands mid-flight.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    inner: Arc<RwLock<Credential>>,
}

impl CredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Credential::new(token))),
        }
    }

    /// Current token string
    pub async fn token(&self) -> String {
        self.inner.read().await.token.clone()
    }

    /// Copy of the current credential
    pub async fn snapshot(&self) -> Credential {
        self.inner.read().await.clone()
    }

    /// Replace the current credential
    pub async fn replace(&self, credential: Credential) {
        *self.inner.write().await = credential;
    }
}

/// Body returned by the tenant token endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct TenantTokenResponse {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub tenant_access_token: Option<String>,
    /// Seconds of validity; informational only
    #[serde(default)]
    pub expire: Option<i64>,
}
