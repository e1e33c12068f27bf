//! Observable fetch lifecycle.
//!
//! Each fetchable resource owns a [`Resource`] slot whose state moves
//! `Idle → InFlight → Success | Failed`. Terminal states stay put until the
//! next [`Resource::run`], which restarts the machine at `InFlight`.
//! Presentation code subscribes to the slot and renders whatever it sees.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::FetchError;

#[derive(Debug)]
pub enum FetchState<T> {
    Idle,
    InFlight,
    Success(Arc<T>),
    Failed(Arc<FetchError>),
}

// Manual impl: `T` itself need not be `Clone` behind the `Arc`.
impl<T> Clone for FetchState<T> {
    fn clone(&self) -> Self {
        match self {
            FetchState::Idle => FetchState::Idle,
            FetchState::InFlight => FetchState::InFlight,
            FetchState::Success(value) => FetchState::Success(Arc::clone(value)),
            FetchState::Failed(err) => FetchState::Failed(Arc::clone(err)),
        }
    }
}

impl<T> FetchState<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::InFlight)
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, FetchState::Success(_) | FetchState::Failed(_))
    }

    #[must_use]
    pub fn value(&self) -> Option<&Arc<T>> {
        match self {
            FetchState::Success(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&Arc<FetchError>> {
        match self {
            FetchState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// A single resource's observable fetch state.
#[derive(Debug)]
pub struct Resource<T> {
    name: &'static str,
    tx: watch::Sender<FetchState<T>>,
}

impl<T> Resource<T> {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        let (tx, _rx) = watch::channel(FetchState::Idle);
        Self { name, tx }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Receiver that sees every state change from now on.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.tx.subscribe()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> FetchState<T> {
        self.tx.borrow().clone()
    }

    /// Drives one fetch through the state machine and returns its outcome.
    ///
    /// The state is `InFlight` while `fetch` is pending and becomes
    /// `Success` or `Failed` once it resolves. If the returned future is
    /// dropped first, nothing further is published and the slot stays
    /// `InFlight` until the next `run`.
    ///
    /// # Errors
    ///
    /// Returns the fetch's own error, shared with the published state.
    pub async fn run<F>(&self, fetch: F) -> Result<Arc<T>, Arc<FetchError>>
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        self.tx.send_replace(FetchState::InFlight);
        tracing::debug!(resource = self.name, "fetch started");

        match fetch.await {
            Ok(value) => {
                let value = Arc::new(value);
                self.tx.send_replace(FetchState::Success(Arc::clone(&value)));
                tracing::debug!(resource = self.name, "fetch succeeded");
                Ok(value)
            }
            Err(err) => {
                let err = Arc::new(err);
                self.tx.send_replace(FetchState::Failed(Arc::clone(&err)));
                tracing::warn!(resource = self.name, error = %err, "fetch failed");
                Err(err)
            }
        }
    }
}
