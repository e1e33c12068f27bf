//! Host-scoped, time-limited credentials.
//!
//! After a successful merchant fetch the merchant's access token is stored
//! here, scoped to the API host, and attached as a cookie to later requests
//! against that host until it expires.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};

/// Cookie name the API expects for the merchant access token.
pub const ACCESS_TOKEN_NAME: &str = "accessToken";

/// Default credential lifetime.
pub const DEFAULT_TTL_SECS: u64 = 3600;

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub name: String,
    pub value: String,
    pub host: String,
    pub path: String,
    /// Only sent over HTTPS.
    pub secure: bool,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// The merchant access token for `host`, valid for `ttl_secs` from `now`.
    #[must_use]
    pub fn access_token(host: &str, token: &str, ttl_secs: u64, now: DateTime<Utc>) -> Self {
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        Self {
            name: ACCESS_TOKEN_NAME.to_owned(),
            value: token.to_owned(),
            host: host.to_ascii_lowercase(),
            path: "/".to_owned(),
            secure: true,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// `name=value`, ready for a `Cookie` header.
    #[must_use]
    pub fn cookie_pair(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("name", &self.name)
            .field("value", &"[redacted]")
            .field("host", &self.host)
            .field("path", &self.path)
            .field("secure", &self.secure)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Where credentials live between requests.
pub trait CredentialStore: Send + Sync {
    /// Stores `credential`, replacing any previous one for the same host.
    fn set(&self, credential: Credential);

    /// The unexpired credential for `host`, if any.
    fn get(&self, host: &str, now: DateTime<Utc>) -> Option<Credential>;
}

/// In-process [`CredentialStore`].
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    by_host: RwLock<HashMap<String, Credential>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn set(&self, credential: Credential) {
        let mut guard = match self.by_host.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        tracing::debug!(host = %credential.host, expires_at = %credential.expires_at, "stored credential");
        guard.insert(credential.host.clone(), credential);
    }

    fn get(&self, host: &str, now: DateTime<Utc>) -> Option<Credential> {
        let guard = match self.by_host.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard
            .get(&host.to_ascii_lowercase())
            .filter(|c| !c.is_expired(now))
            .cloned()
    }
}
