//! HTTP client for the ordering API.
//!
//! Wraps `reqwest` with path construction from scanned identifiers, HTTP
//! status checks, and typed decoding. Every fetch issues exactly one GET and
//! never retries; the envelope's `status` flag is checked after decoding and
//! a `false` surfaces as [`FetchError::Rejected`].

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use outpost_core::{AppConfig, ScannedIdentifiers};
use reqwest::{Client, Url};

use crate::credential::CredentialStore;
use crate::decode::{decode_catalog, decode_location, decode_merchant};
use crate::error::{DecodeError, FetchError};
use crate::types::{
    Envelope, LocationDetails, LocationEnvelope, MenuCatalog, MerchantDetails, MerchantEnvelope,
};

/// Client for the ordering REST API.
///
/// Use [`OutpostClient::new`] for the configured backend or
/// [`OutpostClient::with_base_url`] to point at a mock server in tests.
pub struct OutpostClient {
    client: Client,
    base_url: Url,
    credentials: Option<Arc<dyn CredentialStore>>,
}

impl OutpostClient {
    /// Creates a client from application config.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FetchError::InvalidBaseUrl`] if the
    /// configured base URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        Self::with_base_url(
            &config.api_base_url,
            config.http_timeout_secs,
            &config.http_user_agent,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FetchError::InvalidBaseUrl`] if `base_url`
    /// is not a valid absolute URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise to exactly one trailing slash so path segments are
        // appended below the base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| FetchError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            credentials: None,
        })
    }

    /// Attaches a credential store; matching credentials are sent as cookies.
    #[must_use]
    pub fn with_credentials(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(store);
        self
    }

    /// Host credentials are scoped to.
    #[must_use]
    pub fn host(&self) -> &str {
        self.base_url.host_str().unwrap_or_default()
    }

    /// Fetches the menu catalog for the scanned merchant and outpost.
    ///
    /// Calls `GET merchant/master/allitems/{merchantId}/{outpost}`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::MissingIdentifier`] if `merchantId` or `outpost` is empty.
    /// - [`FetchError::Network`] on transport failure.
    /// - [`FetchError::HttpStatus`] on a non-2xx response.
    /// - [`FetchError::Decode`] if the body does not match the schema.
    /// - [`FetchError::Rejected`] if the body carries `status: false`.
    pub async fn fetch_menu(&self, ids: &ScannedIdentifiers) -> Result<MenuCatalog, FetchError> {
        let merchant_id = require(MenuCatalog::RESOURCE, "merchantId", &ids.merchant_id)?;
        let outpost = require(MenuCatalog::RESOURCE, "outpost", &ids.outpost)?;
        let url = self.resource_url(&["merchant", "master", "allitems", merchant_id, outpost]);

        let body = self.get_bytes(MenuCatalog::RESOURCE, &url).await?;
        let catalog = decode_catalog(&body).map_err(log_decode_failure)?;
        ensure_ok(catalog)
    }

    /// Fetches the scanned location.
    ///
    /// Calls `GET merchant/location/{locationId}`.
    ///
    /// # Errors
    ///
    /// As for [`OutpostClient::fetch_menu`], with `locationId` as the required
    /// identifier.
    pub async fn fetch_location(
        &self,
        ids: &ScannedIdentifiers,
    ) -> Result<LocationDetails, FetchError> {
        let resource = LocationEnvelope::RESOURCE;
        let location_id = require(resource, "locationId", &ids.location_id)?;
        let url = self.resource_url(&["merchant", "location", location_id]);

        let body = self.get_bytes(resource, &url).await?;
        let envelope = decode_location(&body).map_err(log_decode_failure)?;
        ensure_ok(envelope).map(|e| e.location)
    }

    /// Fetches the scanned merchant, including its access token.
    ///
    /// Calls `GET merchant/merchant/{merchantId}`.
    ///
    /// # Errors
    ///
    /// As for [`OutpostClient::fetch_menu`], with `merchantId` as the required
    /// identifier.
    pub async fn fetch_merchant(
        &self,
        ids: &ScannedIdentifiers,
    ) -> Result<MerchantDetails, FetchError> {
        let resource = MerchantEnvelope::RESOURCE;
        let merchant_id = require(resource, "merchantId", &ids.merchant_id)?;
        let url = self.resource_url(&["merchant", "merchant", merchant_id]);

        let body = self.get_bytes(resource, &url).await?;
        let envelope = decode_merchant(&body).map_err(log_decode_failure)?;
        ensure_ok(envelope).map(|e| e.merchant)
    }

    /// Builds `{base}/{segments...}` with each segment percent-encoded.
    fn resource_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends one GET, rejects non-2xx statuses, and returns the raw body.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] on transport failure (including while
    /// reading the body) or [`FetchError::HttpStatus`] on a non-2xx status.
    async fn get_bytes(&self, resource: &'static str, url: &Url) -> Result<Vec<u8>, FetchError> {
        tracing::debug!(resource, url = %url, "GET");

        let mut request = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(cookie) = self.cookie_for(url) {
            request = request.header(reqwest::header::COOKIE, cookie);
        }

        let response = request.send().await.inspect_err(|e| {
            tracing::warn!(resource, url = %url, error = %e, "request failed");
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(resource, url = %url, status = status.as_u16(), "unexpected HTTP status");
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }

    /// `Cookie` header value for `url`, if a live credential matches its host.
    fn cookie_for(&self, url: &Url) -> Option<String> {
        let store = self.credentials.as_ref()?;
        let host = url.host_str()?;
        let credential = store.get(host, Utc::now())?;
        if credential.secure && url.scheme() != "https" {
            return None;
        }
        Some(credential.cookie_pair())
    }
}

fn require<'a>(
    resource: &'static str,
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, FetchError> {
    if value.is_empty() {
        return Err(FetchError::MissingIdentifier { resource, field });
    }
    Ok(value)
}

fn ensure_ok<T: Envelope>(envelope: T) -> Result<T, FetchError> {
    if envelope.status() {
        Ok(envelope)
    } else {
        tracing::warn!(resource = T::RESOURCE, "API returned status=false");
        Err(FetchError::Rejected {
            resource: T::RESOURCE,
        })
    }
}

fn log_decode_failure(err: DecodeError) -> DecodeError {
    tracing::warn!(
        resource = err.resource,
        path = %err.path,
        reason = %err.reason,
        payload = %err.payload,
        "response did not match schema"
    );
    err
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
