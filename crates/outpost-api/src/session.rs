//! One diner's ordering session: the scanned identifiers plus an observable
//! slot per fetched resource.
//!
//! The identifiers are fixed at construction and handed to every fetch, so
//! nothing reads ambient state. Slots are independent: a failure in one
//! never touches the others.

use std::sync::Arc;

use chrono::Utc;
use outpost_core::ScannedIdentifiers;

use crate::client::OutpostClient;
use crate::credential::{Credential, CredentialStore, MemoryCredentialStore, DEFAULT_TTL_SECS};
use crate::error::FetchError;
use crate::state::Resource;
use crate::types::{LocationDetails, MenuCatalog, MerchantDetails};

type Outcome<T> = Result<Arc<T>, Arc<FetchError>>;

pub struct OrderingSession {
    client: OutpostClient,
    ids: ScannedIdentifiers,
    credentials: Arc<dyn CredentialStore>,
    credential_ttl_secs: u64,
    pub menu: Resource<MenuCatalog>,
    pub location: Resource<LocationDetails>,
    pub merchant: Resource<MerchantDetails>,
}

impl OrderingSession {
    /// Starts a session with an in-memory credential store and the default
    /// one-hour credential lifetime.
    #[must_use]
    pub fn new(client: OutpostClient, ids: ScannedIdentifiers) -> Self {
        Self::with_credentials(
            client,
            ids,
            Arc::new(MemoryCredentialStore::new()),
            DEFAULT_TTL_SECS,
        )
    }

    /// Starts a session sharing `credentials` with the client, so a token
    /// stored after the merchant fetch is sent on later requests.
    #[must_use]
    pub fn with_credentials(
        client: OutpostClient,
        ids: ScannedIdentifiers,
        credentials: Arc<dyn CredentialStore>,
        credential_ttl_secs: u64,
    ) -> Self {
        let client = client.with_credentials(Arc::clone(&credentials));
        Self {
            client,
            ids,
            credentials,
            credential_ttl_secs,
            menu: Resource::new("menu"),
            location: Resource::new("location"),
            merchant: Resource::new("merchant"),
        }
    }

    #[must_use]
    pub fn identifiers(&self) -> &ScannedIdentifiers {
        &self.ids
    }

    #[must_use]
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Fetches the menu catalog into [`OrderingSession::menu`].
    ///
    /// # Errors
    ///
    /// Returns the fetch error also published to the slot.
    pub async fn load_menu(&self) -> Outcome<MenuCatalog> {
        self.menu.run(self.client.fetch_menu(&self.ids)).await
    }

    /// Fetches the location into [`OrderingSession::location`].
    ///
    /// # Errors
    ///
    /// Returns the fetch error also published to the slot.
    pub async fn load_location(&self) -> Outcome<LocationDetails> {
        self.location.run(self.client.fetch_location(&self.ids)).await
    }

    /// Fetches the merchant into [`OrderingSession::merchant`] and, on
    /// success, stores its access token as a secure credential for the API
    /// host.
    ///
    /// # Errors
    ///
    /// Returns the fetch error also published to the slot.
    pub async fn load_merchant(&self) -> Outcome<MerchantDetails> {
        let merchant = self
            .merchant
            .run(self.client.fetch_merchant(&self.ids))
            .await?;

        if merchant.access_token.is_empty() {
            tracing::warn!("merchant response carried an empty access token; nothing stored");
        } else {
            self.credentials.set(Credential::access_token(
                self.client.host(),
                &merchant.access_token,
                self.credential_ttl_secs,
                Utc::now(),
            ));
        }

        Ok(merchant)
    }

    /// Fetches merchant and location concurrently, as the welcome screen does.
    pub async fn load_welcome(&self) -> (Outcome<MerchantDetails>, Outcome<LocationDetails>) {
        tokio::join!(self.load_merchant(), self.load_location())
    }
}
