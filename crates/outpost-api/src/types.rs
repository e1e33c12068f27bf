//! Ordering API response types.
//!
//! Field names follow the backend's JSON exactly (mostly camelCase, with a
//! few snake_case stragglers on the merchant record). Every response is a
//! `{"status": bool, ...}` envelope around one resource-specific field.
//!
//! ### Menu shape
//! `items` is overloaded on the wire: the catalog's merchant list, the
//! merchant's category map, and each category's item list are all called
//! `items`. The Rust names say what each one holds.
//!
//! ### Category keys
//! Backend-assigned opaque strings. They are stored in a [`BTreeMap`] so
//! iteration is always ascending key order.
//!
//! ### Strings that look like numbers
//! `categoryOrder`, `optionsLength`, `ordinal`, and `version` arrive as
//! strings and are kept that way; `updatedAt` is an opaque timestamp string.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

// ---------------------------------------------------------------------------
// Menu catalog: GET /merchant/master/allitems/{merchantId}/{outpost}
// ---------------------------------------------------------------------------

/// Root of the menu response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCatalog {
    pub status: bool,
    #[serde(rename = "items")]
    pub merchants: Vec<Merchant>,
}

impl MenuCatalog {
    /// The merchant this app displays: always the first entry.
    ///
    /// The backend has only ever been seen returning one merchant per
    /// identifier. If it returns more, the extras are ignored and a warning
    /// is logged.
    #[must_use]
    pub fn primary_merchant(&self) -> Option<&Merchant> {
        if self.merchants.len() > 1 {
            tracing::warn!(
                merchants = self.merchants.len(),
                "menu catalog has more than one merchant; using the first"
            );
        }
        self.merchants.first()
    }

    /// [`MenuCatalog::primary_merchant`], treating an empty catalog as a
    /// failed menu load for `requested_merchant_id`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::EmptyCatalog`] when no merchant is listed.
    pub fn require_primary_merchant(
        &self,
        requested_merchant_id: &str,
    ) -> Result<&Merchant, FetchError> {
        self.primary_merchant()
            .ok_or_else(|| FetchError::EmptyCatalog {
                merchant_id: requested_merchant_id.to_owned(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    #[serde(rename = "merchantId")]
    pub merchant_id: String,
    #[serde(rename = "items")]
    pub categories: BTreeMap<String, Category>,
}

impl Merchant {
    /// Category keys in display order (ascending, byte-wise).
    #[must_use]
    pub fn category_keys(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    /// `(key, category)` pairs in display order.
    pub fn categories_in_display_order(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "categoryName")]
    pub name: String,
    #[serde(rename = "categoryView")]
    pub view_mode: String,
    /// Numeric sort hint sent as a string. See [`Category::order_number`].
    #[serde(rename = "categoryOrder")]
    pub order: String,
    pub items: Vec<Item>,
}

impl Category {
    /// `order` parsed as an integer, if it is one.
    #[must_use]
    pub fn order_number(&self) -> Option<i64> {
        self.order.trim().parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "itemDetails")]
    pub details: ItemDetails,
    #[serde(rename = "modifierListInfo")]
    pub modifier_list_info: Vec<String>,
    pub variations: Vec<ItemVariation>,
}

impl Item {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.details.data.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    #[serde(rename = "availableLocation")]
    pub available_locations: Vec<String>,
    pub image_url: String,
    #[serde(rename = "itemData")]
    pub data: ItemData,
    pub present_at_all_locations: bool,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    pub recommended_status: bool,
    pub item_id: String,
    pub labels: Vec<String>,
    pub description: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemData {
    pub description_plaintext: String,
    pub is_archived: bool,
    pub description: String,
    pub name: String,
    pub image_urls: Vec<String>,
}

/// A purchasable option of an item (size, flavour, ...), with its own price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemVariation {
    pub options_length: String,
    #[serde(rename = "availableLocation")]
    pub available_locations: Vec<String>,
    #[serde(rename = "customAttributeValues")]
    pub custom_attributes: CustomAttributeValues,
    #[serde(rename = "itemVariationData")]
    pub data: ItemVariationData,
    pub options: Vec<String>,
    pub present_at_all_locations: bool,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemVariationData {
    pub name: String,
    pub item_id: String,
    pub sku: String,
    #[serde(rename = "priceMoney")]
    pub price: PriceMoney,
    pub ordinal: String,
    pub pricing_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomAttributeValues {
    pub name: String,
    pub boolean_value: bool,
}

/// Money in integer minor units (cents for AUD). JSON floats are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceMoney {
    pub amount: i64,
    /// ISO 4217 code, e.g. `"AUD"`.
    pub currency: String,
}

impl PriceMoney {
    /// Renders `"AUD 10.50"` from `amount = 1050`, assuming two minor digits.
    #[must_use]
    pub fn display(&self) -> String {
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        format!("{} {sign}{}.{:02}", self.currency, abs / 100, abs % 100)
    }
}

// ---------------------------------------------------------------------------
// Location: GET /merchant/location/{locationId}
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEnvelope {
    pub status: bool,
    pub location: LocationDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDetails {
    pub created_at: String,
    #[serde(rename = "locationDetail")]
    pub detail: LocationDetail,
    pub location_id: String,
    pub smaaker_merchant_id: String,
    pub nick_name: String,
    /// Backend lifecycle marker for the location (e.g. `"ACTIVE"`); unrelated
    /// to the envelope's boolean `status`.
    pub status: String,
}

impl LocationDetails {
    /// `"addressLine1, locality, country"`, skipping empty parts.
    #[must_use]
    pub fn formatted_address(&self) -> String {
        let address = &self.detail.address;
        [
            address.address_line1.as_str(),
            address.locality.as_str(),
            address.country.as_str(),
        ]
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDetail {
    pub country: String,
    pub address: Address,
    pub capabilities: Vec<String>,
    pub timezone: String,
    pub business_name: String,
    pub description: String,
    pub language_code: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub logo_url: String,
    pub merchant_id: String,
    pub name: String,
    pub logo: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub locality: String,
    pub address_line1: String,
    pub address_line2: String,
    pub postal_code: String,
    pub country: String,
}

// ---------------------------------------------------------------------------
// Merchant: GET /merchant/merchant/{merchantId}
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantEnvelope {
    pub status: bool,
    pub merchant: MerchantDetails,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantDetails {
    pub business_name: String,
    #[serde(rename = "smaakerMerchantId")]
    pub smaaker_merchant_id: String,
    pub main_location_id: String,
    #[serde(rename = "merchantName")]
    pub merchant_name: String,
    /// Bearer credential for authenticated calls.
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub email: String,
    pub country: String,
}

impl std::fmt::Debug for MerchantDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerchantDetails")
            .field("business_name", &self.business_name)
            .field("smaaker_merchant_id", &self.smaaker_merchant_id)
            .field("main_location_id", &self.main_location_id)
            .field("merchant_name", &self.merchant_name)
            .field("access_token", &"[redacted]")
            .field("email", &self.email)
            .field("country", &self.country)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Envelope status
// ---------------------------------------------------------------------------

/// Top-level responses carrying the `status` flag.
pub trait Envelope {
    /// Resource name used in errors and logs.
    const RESOURCE: &'static str;

    /// `false` when the API rejected the request inside a 2xx response.
    fn status(&self) -> bool;
}

impl Envelope for MenuCatalog {
    const RESOURCE: &'static str = "menu";

    fn status(&self) -> bool {
        self.status
    }
}

impl Envelope for LocationEnvelope {
    const RESOURCE: &'static str = "location";

    fn status(&self) -> bool {
        self.status
    }
}

impl Envelope for MerchantEnvelope {
    const RESOURCE: &'static str = "merchant";

    fn status(&self) -> bool {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(order: &str) -> Category {
        Category {
            name: "Mains".to_owned(),
            view_mode: "list".to_owned(),
            order: order.to_owned(),
            items: Vec::new(),
        }
    }

    #[test]
    fn category_keys_are_sorted_regardless_of_insertion_order() {
        let mut categories = BTreeMap::new();
        categories.insert("b".to_owned(), category("2"));
        categories.insert("a".to_owned(), category("1"));
        let merchant = Merchant {
            merchant_id: "m-1".to_owned(),
            categories,
        };
        assert_eq!(merchant.category_keys(), vec!["a", "b"]);
    }

    #[test]
    fn order_number_parses_numeric_strings_only() {
        assert_eq!(category(" 3 ").order_number(), Some(3));
        assert_eq!(category("first").order_number(), None);
    }

    #[test]
    fn price_display_uses_integer_minor_units() {
        let price = PriceMoney {
            amount: 1050,
            currency: "AUD".to_owned(),
        };
        assert_eq!(price.display(), "AUD 10.50");

        let refund = PriceMoney {
            amount: -5,
            currency: "AUD".to_owned(),
        };
        assert_eq!(refund.display(), "AUD -0.05");
    }

    #[test]
    fn price_money_serializes_amount_as_integer() {
        let price = PriceMoney {
            amount: 1050,
            currency: "AUD".to_owned(),
        };
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, r#"{"amount":1050,"currency":"AUD"}"#);
    }

    #[test]
    fn primary_merchant_is_first_entry() {
        let catalog = MenuCatalog {
            status: true,
            merchants: vec![
                Merchant {
                    merchant_id: "first".to_owned(),
                    categories: BTreeMap::new(),
                },
                Merchant {
                    merchant_id: "second".to_owned(),
                    categories: BTreeMap::new(),
                },
            ],
        };
        assert_eq!(catalog.primary_merchant().unwrap().merchant_id, "first");
        assert_eq!(
            catalog.require_primary_merchant("first").unwrap().merchant_id,
            "first"
        );
    }

    #[test]
    fn empty_catalog_has_no_primary_merchant() {
        let catalog = MenuCatalog {
            status: true,
            merchants: vec![],
        };
        assert!(catalog.primary_merchant().is_none());
        assert!(matches!(
            catalog.require_primary_merchant("m-1"),
            Err(FetchError::EmptyCatalog { ref merchant_id }) if merchant_id == "m-1"
        ));
    }

    #[test]
    fn merchant_debug_redacts_access_token() {
        let merchant = MerchantDetails {
            business_name: "Pizza Hut".to_owned(),
            smaaker_merchant_id: "smaaker-1".to_owned(),
            main_location_id: "LOC1".to_owned(),
            merchant_name: "Pizza Hut Sydney".to_owned(),
            access_token: "secret-token".to_owned(),
            email: "owner@example.com".to_owned(),
            country: "AU".to_owned(),
        };
        let debug = format!("{merchant:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("[redacted]"));
    }
}
