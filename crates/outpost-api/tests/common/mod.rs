//! Shared fixtures for the wiremock integration tests.

#![allow(dead_code)]

use outpost_api::OutpostClient;
use outpost_core::ScannedIdentifiers;
use serde_json::{json, Value};

pub const MERCHANT_ID: &str = "smaaker-4574-a7bc-0bdd";
pub const LOCATION_ID: &str = "LP960V7BZ3Y61";
pub const OUTPOST: &str = "T15";

/// Builds an `OutpostClient` suitable for tests: 5-second timeout, descriptive UA.
pub fn test_client(base_url: &str) -> OutpostClient {
    OutpostClient::with_base_url(base_url, 5, "outpost-test/0.1")
        .expect("failed to build test OutpostClient")
}

/// Base URL of a local port with nothing listening on it.
pub fn unreachable_base_url() -> String {
    let listener =
        std::net::TcpListener::bind("127.0.0.1:0").expect("failed to bind an ephemeral port");
    let port = listener
        .local_addr()
        .expect("bound listener has an address")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

pub fn scanned() -> ScannedIdentifiers {
    ScannedIdentifiers::new(MERCHANT_ID, LOCATION_ID, OUTPOST)
}

pub fn menu_path() -> String {
    format!("/merchant/master/allitems/{MERCHANT_ID}/{OUTPOST}")
}

pub fn location_path() -> String {
    format!("/merchant/location/{LOCATION_ID}")
}

pub fn merchant_path() -> String {
    format!("/merchant/merchant/{MERCHANT_ID}")
}

pub fn item_json(name: &str, amount: i64) -> Value {
    json!({
        "itemDetails": {
            "availableLocation": [LOCATION_ID],
            "imageUrl": "",
            "itemData": {
                "descriptionPlaintext": "",
                "isArchived": false,
                "description": "",
                "name": name,
                "imageUrls": []
            },
            "presentAtAllLocations": true,
            "id": format!("{name}-id"),
            "type": "ITEM",
            "version": "1",
            "recommendedStatus": false,
            "itemId": format!("{name}-id"),
            "labels": [],
            "description": "",
            "enabled": true
        },
        "modifierListInfo": [],
        "variations": [{
            "optionsLength": "0",
            "availableLocation": [LOCATION_ID],
            "customAttributeValues": { "name": "", "booleanValue": false },
            "itemVariationData": {
                "name": "Regular",
                "itemId": format!("{name}-id"),
                "sku": "",
                "priceMoney": { "amount": amount, "currency": "AUD" },
                "ordinal": "0",
                "pricingType": "FIXED_PRICING"
            },
            "options": [],
            "presentAtAllLocations": true,
            "id": format!("{name}-var"),
            "type": "ITEM_VARIATION",
            "version": "1",
            "updatedAt": "2024-06-10T04:00:00.000Z"
        }]
    })
}

pub fn menu_json() -> Value {
    json!({
        "status": true,
        "items": [{
            "merchantId": MERCHANT_ID,
            "items": {
                "b-drinks": {
                    "categoryName": "Drinks",
                    "categoryView": "grid",
                    "categoryOrder": "2",
                    "items": [item_json("Cola", 450)]
                },
                "a-mains": {
                    "categoryName": "Mains",
                    "categoryView": "list",
                    "categoryOrder": "1",
                    "items": [item_json("Margherita", 1050)]
                }
            }
        }]
    })
}

pub fn location_json() -> Value {
    json!({
        "status": true,
        "location": {
            "createdAt": "2024-06-01T00:00:00Z",
            "locationDetail": {
                "country": "AU",
                "address": {
                    "locality": "Sydney",
                    "addressLine1": "1 George St",
                    "addressLine2": "",
                    "postalCode": "2000",
                    "country": "AU"
                },
                "capabilities": [],
                "timezone": "Australia/Sydney",
                "businessName": "Pizza Hut",
                "description": "",
                "languageCode": "en-AU",
                "type": "PHYSICAL",
                "logoUrl": "",
                "merchantId": "SQ-MERCHANT",
                "name": "George St",
                "logo": "",
                "currency": "AUD"
            },
            "locationId": LOCATION_ID,
            "smaakerMerchantId": MERCHANT_ID,
            "nickName": "CBD",
            "status": "ACTIVE"
        }
    })
}

pub fn merchant_json(access_token: &str) -> Value {
    json!({
        "status": true,
        "merchant": {
            "business_name": "Pizza Hut",
            "smaakerMerchantId": MERCHANT_ID,
            "main_location_id": LOCATION_ID,
            "merchantName": "Pizza Hut AU",
            "accessToken": access_token,
            "email": "owner@example.com",
            "country": "AU"
        }
    })
}
