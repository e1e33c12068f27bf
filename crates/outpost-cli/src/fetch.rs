//! Fetch command handlers: `menu`, `location`, `merchant` and `welcome`.
//!
//! Each handler resolves the scanned identifiers once, builds an
//! [`OrderingSession`] around them, and prints the outcome. Nothing is
//! retried; a failed load exits non-zero.

use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use outpost_api::{MemoryCredentialStore, OrderingSession, OutpostClient};
use outpost_core::{AppConfig, ScannedIdentifiers, SessionFile};

use crate::render;

/// Where the identifiers for a fetch come from.
///
/// Explicit flags win over `--qr`, which wins over the last `outpost scan`.
#[derive(Debug, Default, Args)]
pub struct TargetArgs {
    /// Table QR URL to parse instead of the saved scan
    #[arg(long)]
    pub qr: Option<String>,
    #[arg(long)]
    pub merchant_id: Option<String>,
    #[arg(long)]
    pub location_id: Option<String>,
    /// Table or sub-location id
    #[arg(long)]
    pub outpost: Option<String>,
}

impl TargetArgs {
    fn flags(&self) -> ScannedIdentifiers {
        ScannedIdentifiers::new(
            self.merchant_id.clone().unwrap_or_default(),
            self.location_id.clone().unwrap_or_default(),
            self.outpost.clone().unwrap_or_default(),
        )
    }
}

/// Resolve identifiers from flags, then `--qr`, then the saved session file.
///
/// # Errors
///
/// Returns an error if the session file exists but cannot be read.
pub(crate) fn resolve_identifiers(
    target: &TargetArgs,
    session: &SessionFile,
) -> anyhow::Result<ScannedIdentifiers> {
    let saved = session.load()?.unwrap_or_default();
    let scanned = target
        .qr
        .as_deref()
        .map(outpost_api::qr::parse)
        .unwrap_or_default();

    let ids = saved.merged_with(&scanned).merged_with(&target.flags());
    tracing::debug!(?ids, "resolved identifiers");
    Ok(ids)
}

fn open_session(config: &AppConfig, target: &TargetArgs) -> anyhow::Result<OrderingSession> {
    let ids = resolve_identifiers(target, &SessionFile::new(config.session_path.clone()))?;
    if ids.is_empty() {
        anyhow::bail!("no table identifiers; run `outpost scan <URL>` or pass --qr");
    }

    let client = OutpostClient::new(config)?;
    Ok(OrderingSession::with_credentials(
        client,
        ids,
        Arc::new(MemoryCredentialStore::new()),
        config.credential_ttl_secs,
    ))
}

/// Load and print the menu for the scanned table.
///
/// # Errors
///
/// Returns an error if the menu cannot be fetched or lists no merchants.
pub(crate) async fn run_menu(config: &AppConfig, target: &TargetArgs) -> anyhow::Result<()> {
    let session = open_session(config, target)?;
    let catalog = session.load_menu().await.context("failed to load menu")?;

    let merchant = catalog
        .require_primary_merchant(&session.identifiers().merchant_id)
        .context("failed to load menu")?;

    print!("{}", render::menu(merchant));
    Ok(())
}

/// Load and print the scanned location.
///
/// # Errors
///
/// Returns an error if the location cannot be fetched.
pub(crate) async fn run_location(config: &AppConfig, target: &TargetArgs) -> anyhow::Result<()> {
    let session = open_session(config, target)?;
    let location = session
        .load_location()
        .await
        .context("failed to load location")?;

    print!("{}", render::location(&location));
    Ok(())
}

/// Load and print the scanned merchant.
///
/// # Errors
///
/// Returns an error if the merchant cannot be fetched.
pub(crate) async fn run_merchant(config: &AppConfig, target: &TargetArgs) -> anyhow::Result<()> {
    let session = open_session(config, target)?;
    let merchant = session
        .load_merchant()
        .await
        .context("failed to load merchant")?;

    print!("{}", render::merchant(&merchant));
    Ok(())
}

/// Load merchant and location concurrently and print whichever succeeded.
///
/// # Errors
///
/// Returns an error if either load failed, after printing both outcomes.
pub(crate) async fn run_welcome(config: &AppConfig, target: &TargetArgs) -> anyhow::Result<()> {
    let session = open_session(config, target)?;
    let (merchant, location) = session.load_welcome().await;

    let mut failed = Vec::new();
    match &merchant {
        Ok(merchant) => print!("{}", render::merchant(merchant)),
        Err(err) => {
            eprintln!("failed to load merchant: {err}");
            failed.push("merchant");
        }
    }
    match &location {
        Ok(location) => print!("{}", render::location(location)),
        Err(err) => {
            eprintln!("failed to load location: {err}");
            failed.push("location");
        }
    }

    if !failed.is_empty() {
        anyhow::bail!("failed to load {}", failed.join(" and "));
    }
    Ok(())
}
