//! Integration tests for `OutpostClient` using wiremock HTTP mocks.

mod common;

use outpost_api::FetchError;
use outpost_core::ScannedIdentifiers;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{
    location_json, location_path, menu_json, menu_path, merchant_json, merchant_path, scanned,
    test_client, unreachable_base_url,
};

#[tokio::test]
async fn fetch_menu_returns_parsed_catalog() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(menu_path()))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(menu_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let catalog = client.fetch_menu(&scanned()).await.expect("should parse menu");

    assert!(catalog.status);
    let merchant = catalog.primary_merchant().expect("one merchant");
    assert_eq!(merchant.category_keys(), vec!["a-mains", "b-drinks"]);
    let mains = &merchant.categories["a-mains"];
    assert_eq!(mains.items[0].name(), "Margherita");
    assert_eq!(mains.items[0].variations[0].data.price.amount, 1050);
}

#[tokio::test]
async fn fetched_menu_selects_first_merchant() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(menu_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(menu_json()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let catalog = client.fetch_menu(&scanned()).await.unwrap();
    let merchant = catalog.require_primary_merchant(common::MERCHANT_ID).unwrap();

    assert_eq!(merchant.merchant_id, common::MERCHANT_ID);
}

#[tokio::test]
async fn empty_menu_decodes_but_has_no_merchant_to_select() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(menu_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true, "items": []})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let catalog = client.fetch_menu(&scanned()).await.unwrap();
    let result = catalog.require_primary_merchant(common::MERCHANT_ID);

    assert!(
        matches!(result, Err(FetchError::EmptyCatalog { ref merchant_id }) if merchant_id == common::MERCHANT_ID),
        "expected EmptyCatalog, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_location_returns_location_details() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(location_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(location_json()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let location = client.fetch_location(&scanned()).await.unwrap();

    assert_eq!(location.location_id, common::LOCATION_ID);
    assert_eq!(location.nick_name, "CBD");
    assert_eq!(location.formatted_address(), "1 George St, Sydney, AU");
}

#[tokio::test]
async fn fetch_merchant_returns_merchant_details() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(merchant_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(merchant_json("tok-1")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let merchant = client.fetch_merchant(&scanned()).await.unwrap();

    assert_eq!(merchant.business_name, "Pizza Hut");
    assert_eq!(merchant.access_token, "tok-1");
}

#[tokio::test]
async fn base_path_is_preserved() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/dev{}", location_path())))
        .respond_with(ResponseTemplate::new(200).set_body_json(location_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/dev/", server.uri()));
    client.fetch_location(&scanned()).await.unwrap();
}

#[tokio::test]
async fn non_success_status_is_reported_without_decoding() {
    let server = MockServer::start().await;

    // A perfectly valid body: it must still be ignored because of the status.
    Mock::given(method("GET"))
        .and(path(location_path()))
        .respond_with(ResponseTemplate::new(503).set_body_json(location_json()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_location(&scanned()).await;

    assert!(
        matches!(result, Err(FetchError::HttpStatus { status: 503, .. })),
        "expected HttpStatus(503), got: {result:?}"
    );
}

#[tokio::test]
async fn not_found_is_http_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(merchant_path()))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_merchant(&scanned()).await.unwrap_err();

    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn false_status_is_rejected() {
    let server = MockServer::start().await;

    let mut body = merchant_json("tok-1");
    body["status"] = json!(false);
    Mock::given(method("GET"))
        .and(path(merchant_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_merchant(&scanned()).await;

    assert!(
        matches!(result, Err(FetchError::Rejected { resource: "merchant" })),
        "expected Rejected, got: {result:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_decode_error_with_path() {
    let server = MockServer::start().await;

    let mut body = menu_json();
    body["items"][0]["items"]["a-mains"]["items"][0]["itemDetails"]
        .as_object_mut()
        .unwrap()
        .remove("itemId");
    Mock::given(method("GET"))
        .and(path(menu_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_menu(&scanned()).await.unwrap_err();

    let FetchError::Decode(decode) = err else {
        panic!("expected Decode, got: {err:?}");
    };
    assert_eq!(
        decode.path,
        r#"$.items[0].items["a-mains"].items[0].itemDetails.itemId"#
    );
    assert!(!decode.payload.is_empty());
}

#[tokio::test]
async fn missing_identifier_sends_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(menu_json()))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let ids = ScannedIdentifiers::new(common::MERCHANT_ID, common::LOCATION_ID, "");
    let result = client.fetch_menu(&ids).await;

    assert!(
        matches!(
            result,
            Err(FetchError::MissingIdentifier {
                field: "outpost",
                ..
            })
        ),
        "expected MissingIdentifier(outpost), got: {result:?}"
    );
}

#[tokio::test]
async fn failed_fetch_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(menu_path()))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_menu(&scanned()).await;

    assert!(matches!(result, Err(FetchError::HttpStatus { status: 500, .. })));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let client = test_client(&unreachable_base_url());
    let result = client.fetch_location(&scanned()).await;

    assert!(
        matches!(result, Err(FetchError::Network(_))),
        "expected Network, got: {result:?}"
    );
}
