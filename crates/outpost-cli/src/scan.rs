use outpost_core::{AppConfig, SessionFile};

use crate::render;

/// Parse a scanned QR URL, print what it carried, and persist it.
///
/// A degraded scan is still saved: later commands report exactly which
/// identifier is missing rather than falling back to an older scan.
///
/// # Errors
///
/// Returns an error if the session file cannot be written.
pub(crate) fn run_scan(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let ids = outpost_api::qr::parse(url);

    if !ids.is_complete() {
        tracing::warn!(missing = ?ids.missing(), "QR code did not carry every identifier");
    }

    let session = SessionFile::new(config.session_path.clone());
    session.save(&ids)?;

    print!("{}", render::identifiers(&ids));
    println!("saved to {}", session.path().display());
    Ok(())
}
