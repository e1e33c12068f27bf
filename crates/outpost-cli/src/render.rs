//! Plain-text rendering of fetched resources for the terminal.
//!
//! Every function returns the full text, newline-terminated, so handlers
//! decide where it goes and tests can assert on it.

use std::fmt::Write as _;

use outpost_api::{Item, LocationDetails, Merchant, MerchantDetails};
use outpost_core::ScannedIdentifiers;

pub(crate) fn identifiers(ids: &ScannedIdentifiers) -> String {
    let show = |value: &str| {
        if value.is_empty() {
            "(missing)".to_owned()
        } else {
            value.to_owned()
        }
    };
    let lines = [
        format!("{:<12}{}", "merchantId", show(&ids.merchant_id)),
        format!("{:<12}{}", "locationId", show(&ids.location_id)),
        format!("{:<12}{}", "outpost", show(&ids.outpost)),
    ];
    finish(&lines)
}

/// Categories in ascending key order, each followed by its items and
/// variation prices.
pub(crate) fn menu(merchant: &Merchant) -> String {
    let mut lines = vec![format!("Menu for merchant {}", merchant.merchant_id)];

    if merchant.categories.is_empty() {
        lines.push("(no categories)".to_owned());
    }

    for (key, category) in merchant.categories_in_display_order() {
        lines.push(String::new());
        lines.push(format!(
            "## {} [{key}] ({} view)",
            category.name, category.view_mode
        ));
        for item in &category.items {
            lines.extend(item_lines(item));
        }
    }

    finish(&lines)
}

fn item_lines(item: &Item) -> Vec<String> {
    let mut heading = format!("  {}", item.name());
    if !item.details.labels.is_empty() {
        let _ = write!(heading, " [{}]", item.details.labels.join(", "));
    }
    if !item.details.enabled {
        heading.push_str(" (unavailable)");
    }

    let mut lines = vec![heading];
    for variation in &item.variations {
        lines.push(format!(
            "    {:<24}{}",
            variation.data.name,
            variation.data.price.display()
        ));
    }
    lines
}

pub(crate) fn location(location: &LocationDetails) -> String {
    let detail = &location.detail;
    let lines = [
        format!("{} ({})", detail.business_name, location.nick_name),
        format!("{:<10}{}", "address", location.formatted_address()),
        format!("{:<10}{}", "timezone", detail.timezone),
        format!("{:<10}{}", "currency", detail.currency),
        format!("{:<10}{}", "status", location.status),
    ];
    finish(&lines)
}

/// Merchant summary. The access token is never printed.
pub(crate) fn merchant(merchant: &MerchantDetails) -> String {
    let lines = [
        format!("{} ({})", merchant.business_name, merchant.merchant_name),
        format!("{:<15}{}", "merchant id", merchant.smaaker_merchant_id),
        format!("{:<15}{}", "main location", merchant.main_location_id),
        format!("{:<15}{}", "country", merchant.country),
    ];
    finish(&lines)
}

fn finish(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
