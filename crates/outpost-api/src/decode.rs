//! Strict decoding of ordering API responses.
//!
//! Bodies are parsed into a `serde_json::Value` first and then walked one
//! container at a time, so a failure reports where it happened
//! (`$.items[0].items["mains"].items[2].itemDetails.itemId`) instead of just a
//! line and column. Every record is walked field by field; only scalars and
//! string lists go through `Deserialize` directly.
//!
//! Unknown fields are ignored. Missing fields and type mismatches are errors.
//! The envelope's `status` must be present and boolean; acting on a `false`
//! value is the caller's job (see [`crate::Envelope`]).

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::types::{
    Address, Category, CustomAttributeValues, Item, ItemData, ItemDetails, ItemVariation,
    ItemVariationData, LocationDetail, LocationDetails, LocationEnvelope, MenuCatalog, Merchant,
    MerchantDetails, MerchantEnvelope, PriceMoney,
};

/// Location of a failure inside the body, before the body itself is attached.
#[derive(Debug)]
struct PathError {
    path: String,
    reason: String,
}

type Decoded<T> = Result<T, PathError>;

/// A JSON node together with its path from the document root.
#[derive(Clone, Copy)]
struct Node<'a> {
    path: &'a str,
    value: &'a Value,
}

impl<'a> Node<'a> {
    fn object(self) -> Decoded<&'a Map<String, Value>> {
        self.value.as_object().ok_or_else(|| PathError {
            path: self.path.to_owned(),
            reason: format!("expected object, found {}", kind_of(self.value)),
        })
    }

    fn array(self) -> Decoded<&'a Vec<Value>> {
        self.value.as_array().ok_or_else(|| PathError {
            path: self.path.to_owned(),
            reason: format!("expected array, found {}", kind_of(self.value)),
        })
    }

    /// Child at `key`, with its path written into `buf`.
    fn child<'b>(self, key: &str, buf: &'b mut String) -> Decoded<Node<'b>>
    where
        'a: 'b,
    {
        let value = self.object()?.get(key);
        *buf = format!("{}.{key}", self.path);
        let Some(value) = value else {
            return Err(PathError {
                path: buf.clone(),
                reason: "missing field".to_owned(),
            });
        };
        Ok(Node {
            path: buf.as_str(),
            value,
        })
    }

    /// Deserializes `key` with its serde impl.
    fn field<T: DeserializeOwned>(self, key: &str) -> Decoded<T> {
        let mut buf = String::new();
        let node = self.child(key, &mut buf)?;
        node.leaf()
    }

    /// Deserializes this whole node with its serde impl.
    fn leaf<T: DeserializeOwned>(self) -> Decoded<T> {
        T::deserialize(self.value).map_err(|e| PathError {
            path: self.path.to_owned(),
            reason: e.to_string(),
        })
    }

    /// Decodes every element of the array at `key`.
    fn each<T>(self, key: &str, decode: impl Fn(Node<'_>) -> Decoded<T>) -> Decoded<Vec<T>> {
        let mut buf = String::new();
        let list = self.child(key, &mut buf)?;
        list.array()?
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let path = format!("{}[{i}]", list.path);
                decode(Node { path: &path, value })
            })
            .collect()
    }

    /// Decodes every value of the object at `key`, keyed by its property name.
    fn each_entry<T>(
        self,
        key: &str,
        decode: impl Fn(Node<'_>) -> Decoded<T>,
    ) -> Decoded<BTreeMap<String, T>> {
        let mut buf = String::new();
        let map = self.child(key, &mut buf)?;
        map.object()?
            .iter()
            .map(|(entry_key, value)| {
                let path = format!("{}[{entry_key:?}]", map.path);
                decode(Node { path: &path, value }).map(|v| (entry_key.clone(), v))
            })
            .collect()
    }

    /// Decodes the object at `key` with a hand-written decoder.
    fn nested<T>(self, key: &str, decode: impl Fn(Node<'_>) -> Decoded<T>) -> Decoded<T> {
        let mut buf = String::new();
        let node = self.child(key, &mut buf)?;
        decode(node)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Menu catalog
// ---------------------------------------------------------------------------

/// Decodes a menu catalog response body.
///
/// # Errors
///
/// Returns [`DecodeError`] with the path of the first missing or mistyped
/// field, or `$` if the body is not JSON at all.
pub fn decode_catalog(body: &[u8]) -> Result<MenuCatalog, DecodeError> {
    decode_root("menu", body, |root| {
        Ok(MenuCatalog {
            status: root.field("status")?,
            merchants: root.each("items", merchant)?,
        })
    })
}

fn merchant(node: Node<'_>) -> Decoded<Merchant> {
    Ok(Merchant {
        merchant_id: node.field("merchantId")?,
        categories: node.each_entry("items", category)?,
    })
}

fn category(node: Node<'_>) -> Decoded<Category> {
    Ok(Category {
        name: node.field("categoryName")?,
        view_mode: node.field("categoryView")?,
        order: node.field("categoryOrder")?,
        items: node.each("items", item)?,
    })
}

fn item(node: Node<'_>) -> Decoded<Item> {
    Ok(Item {
        details: node.nested("itemDetails", item_details)?,
        modifier_list_info: node.field("modifierListInfo")?,
        variations: node.each("variations", item_variation)?,
    })
}

fn item_details(node: Node<'_>) -> Decoded<ItemDetails> {
    Ok(ItemDetails {
        available_locations: node.field("availableLocation")?,
        image_url: node.field("imageUrl")?,
        data: node.nested("itemData", item_data)?,
        present_at_all_locations: node.field("presentAtAllLocations")?,
        id: node.field("id")?,
        kind: node.field("type")?,
        version: node.field("version")?,
        recommended_status: node.field("recommendedStatus")?,
        item_id: node.field("itemId")?,
        labels: node.field("labels")?,
        description: node.field("description")?,
        enabled: node.field("enabled")?,
    })
}

fn item_data(node: Node<'_>) -> Decoded<ItemData> {
    Ok(ItemData {
        description_plaintext: node.field("descriptionPlaintext")?,
        is_archived: node.field("isArchived")?,
        description: node.field("description")?,
        name: node.field("name")?,
        image_urls: node.field("imageUrls")?,
    })
}

fn item_variation(node: Node<'_>) -> Decoded<ItemVariation> {
    Ok(ItemVariation {
        options_length: node.field("optionsLength")?,
        available_locations: node.field("availableLocation")?,
        custom_attributes: node.nested("customAttributeValues", custom_attributes)?,
        data: node.nested("itemVariationData", item_variation_data)?,
        options: node.field("options")?,
        present_at_all_locations: node.field("presentAtAllLocations")?,
        id: node.field("id")?,
        kind: node.field("type")?,
        version: node.field("version")?,
        updated_at: node.field("updatedAt")?,
    })
}

fn item_variation_data(node: Node<'_>) -> Decoded<ItemVariationData> {
    Ok(ItemVariationData {
        name: node.field("name")?,
        item_id: node.field("itemId")?,
        sku: node.field("sku")?,
        price: node.nested("priceMoney", price_money)?,
        ordinal: node.field("ordinal")?,
        pricing_type: node.field("pricingType")?,
    })
}

fn custom_attributes(node: Node<'_>) -> Decoded<CustomAttributeValues> {
    Ok(CustomAttributeValues {
        name: node.field("name")?,
        boolean_value: node.field("booleanValue")?,
    })
}

fn price_money(node: Node<'_>) -> Decoded<PriceMoney> {
    Ok(PriceMoney {
        amount: node.field("amount")?,
        currency: node.field("currency")?,
    })
}

// ---------------------------------------------------------------------------
// Location and merchant
// ---------------------------------------------------------------------------

/// Decodes a location response body.
///
/// # Errors
///
/// Returns [`DecodeError`] with the path of the first missing or mistyped field.
pub fn decode_location(body: &[u8]) -> Result<LocationEnvelope, DecodeError> {
    decode_root("location", body, |root| {
        Ok(LocationEnvelope {
            status: root.field("status")?,
            location: root.nested("location", location_details)?,
        })
    })
}

fn location_details(node: Node<'_>) -> Decoded<LocationDetails> {
    Ok(LocationDetails {
        created_at: node.field("createdAt")?,
        detail: node.nested("locationDetail", location_detail)?,
        location_id: node.field("locationId")?,
        smaaker_merchant_id: node.field("smaakerMerchantId")?,
        nick_name: node.field("nickName")?,
        status: node.field("status")?,
    })
}

fn location_detail(node: Node<'_>) -> Decoded<LocationDetail> {
    Ok(LocationDetail {
        country: node.field("country")?,
        address: node.nested("address", address)?,
        capabilities: node.field("capabilities")?,
        timezone: node.field("timezone")?,
        business_name: node.field("businessName")?,
        description: node.field("description")?,
        language_code: node.field("languageCode")?,
        kind: node.field("type")?,
        logo_url: node.field("logoUrl")?,
        merchant_id: node.field("merchantId")?,
        name: node.field("name")?,
        logo: node.field("logo")?,
        currency: node.field("currency")?,
    })
}

fn address(node: Node<'_>) -> Decoded<Address> {
    Ok(Address {
        locality: node.field("locality")?,
        address_line1: node.field("addressLine1")?,
        address_line2: node.field("addressLine2")?,
        postal_code: node.field("postalCode")?,
        country: node.field("country")?,
    })
}

/// Decodes a merchant response body.
///
/// # Errors
///
/// Returns [`DecodeError`] with the path of the first missing or mistyped field.
pub fn decode_merchant(body: &[u8]) -> Result<MerchantEnvelope, DecodeError> {
    decode_root("merchant", body, |root| {
        Ok(MerchantEnvelope {
            status: root.field("status")?,
            merchant: root.nested("merchant", merchant_details)?,
        })
    })
}

fn merchant_details(node: Node<'_>) -> Decoded<MerchantDetails> {
    Ok(MerchantDetails {
        business_name: node.field("business_name")?,
        smaaker_merchant_id: node.field("smaakerMerchantId")?,
        main_location_id: node.field("main_location_id")?,
        merchant_name: node.field("merchantName")?,
        access_token: node.field("accessToken")?,
        email: node.field("email")?,
        country: node.field("country")?,
    })
}

/// Parses `body` as JSON and runs `decode` from the root, attaching the
/// resource name and raw body to any failure.
fn decode_root<T>(
    resource: &'static str,
    body: &[u8],
    decode: impl FnOnce(Node<'_>) -> Decoded<T>,
) -> Result<T, DecodeError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| DecodeError::new(resource, "$".to_owned(), e.to_string(), body))?;

    decode(Node {
        path: "$",
        value: &value,
    })
    .map_err(|e| DecodeError::new(resource, e.path, e.reason, body))
}

#[cfg(test)]
#[path = "decode_test.rs"]
mod tests;
