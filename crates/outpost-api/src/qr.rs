//! Table QR code payload parsing.
//!
//! A table code encodes a URL such as
//! `https://order.example.com/?merchantId=M&locationId=L&outpost=T15`.
//! Relative references (`?merchantId=M&...`, `/t?merchantId=M&...`) are
//! accepted too. Scanner output is untrusted, so anything unparseable
//! degrades to empty identifiers rather than an error.

use outpost_core::ScannedIdentifiers;
use percent_encoding::percent_decode_str;
use reqwest::Url;

/// Base that relative references are resolved against; only the query is read.
const RELATIVE_BASE: &str = "qr://scan/";

/// Extracts `merchantId`, `locationId`, and `outpost` from a scanned URL.
///
/// Names match exactly and case-sensitively; other parameters are ignored.
/// A repeated parameter takes its last value. Names and values are
/// percent-decoded but `+` stays a literal plus. Input without a query
/// yields all-empty identifiers.
#[must_use]
pub fn parse(raw: &str) -> ScannedIdentifiers {
    let mut ids = ScannedIdentifiers::default();

    let url = match Url::parse(RELATIVE_BASE).and_then(|base| base.join(raw.trim())) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(error = %e, "scanned text is not a URL; using empty identifiers");
            return ids;
        }
    };

    let Some(query) = url.query() else {
        tracing::debug!(url = %url, "scanned URL has no query; using empty identifiers");
        return ids;
    };

    for (name, value) in query_items(query) {
        match name.as_str() {
            "merchantId" => ids.merchant_id = value,
            "locationId" => ids.location_id = value,
            "outpost" => ids.outpost = value,
            _ => {}
        }
    }

    if !ids.is_complete() {
        tracing::debug!(missing = ?ids.missing(), "scanned URL is missing identifiers");
    }

    ids
}

/// Splits a raw query into decoded `(name, value)` pairs.
///
/// A parameter without `=` has an empty value.
fn query_items(query: &str) -> impl Iterator<Item = (String, String)> + '_ {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(name), decode(value))
        })
}

fn decode(component: &str) -> String {
    percent_decode_str(component).decode_utf8_lossy().into_owned()
}
