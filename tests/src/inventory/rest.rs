#![cfg(test)]
use std::time::Duration;

use netinv_common::config::RestConfig;
use netinv_common::error::InventoryError;
use netinv_common::inventory::InventoryBackend;
use netinv_common::models::device::DiscoveredDevice;
use netinv_common::models::inventory::{RecordFilter, RecordId, RecordUpdate};
use netinv_common::network::mac::normalize_mac;
use netinv_inventory::RestInventory;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> RestConfig {
    RestConfig {
        base_url: format!("{}/api/v1/", server.uri()),
        api_key: Some("test-token".into()),
        timeout: Duration::from_secs(5),
        retry_count: 3,
        model_id: 8,
        ..Default::default()
    }
}

fn asset(id: i64, mac: &str, ip: &str) -> Value {
    json!({
        "id": id,
        "name": format!("asset-{id}"),
        "asset_tag": format!("NET-{id:06}"),
        "status_label": {"id": 2, "name": "Ready to Deploy"},
        "category": {"id": 4, "name": "Network"},
        "custom_fields": {
            "MAC Address": {"field": "_snipeit_mac_address_1", "value": mac},
            "IP Address": {"field": "_snipeit_ip_address_2", "value": ip}
        }
    })
}

#[tokio::test]
async fn test_connection_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/hardware"))
        .and(query_param("limit", "1"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0, "rows": []})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RestInventory::new(&config(&server)).unwrap();
    backend.test_connection().await.unwrap();
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/hardware"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Unauthorized."})))
        .mount(&server)
        .await;

    let backend = RestInventory::new(&config(&server)).unwrap();
    let err = backend.test_connection().await.unwrap_err();
    assert!(matches!(err, InventoryError::Auth(_)));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn unavailable_gateway_is_a_connection_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/hardware"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let backend = RestInventory::new(&config(&server)).unwrap();
    let err = backend.test_connection().await.unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn rate_limited_requests_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/hardware"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/hardware"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0, "rows": []})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RestInventory::new(&config(&server)).unwrap();
    backend.test_connection().await.unwrap();
}

#[tokio::test]
async fn list_all_walks_every_page() {
    let server = MockServer::start().await;
    let first: Vec<Value> = (1..=100).map(|i| asset(i, "", "")).collect();
    let second: Vec<Value> = (101..=150).map(|i| asset(i, "", "")).collect();

    Mock::given(method("GET"))
        .and(path("/api/v1/hardware"))
        .and(query_param("offset", "0"))
        .and(query_param("category_id", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 150, "rows": first})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/hardware"))
        .and(query_param("offset", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 150, "rows": second})))
        .mount(&server)
        .await;

    let backend = RestInventory::new(&config(&server)).unwrap();
    let records = backend.list_all(&RecordFilter::default()).await.unwrap();

    assert_eq!(records.len(), 150);
    assert_eq!(records[149].id, Some(RecordId::from(150)));
    assert_eq!(records[0].category.as_deref(), Some("Network"));
}

#[tokio::test]
async fn find_by_mac_filters_search_hits_exactly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/hardware"))
        .and(query_param("search", "AA:BB:CC:DD:EE:FF"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 2,
            "rows": [
                asset(1, "aa:bb:cc:dd:ee:00", "192.168.1.4"),
                asset(2, "aa-bb-cc-dd-ee-ff", "192.168.1.5")
            ]
        })))
        .mount(&server)
        .await;

    let backend = RestInventory::new(&config(&server)).unwrap();
    let mac = normalize_mac("AA:BB:CC:DD:EE:FF").unwrap();
    let found = backend.find_by_mac(&mac).await.unwrap().unwrap();

    assert_eq!(found.id, Some(RecordId::from(2)));
    assert_eq!(found.ip_address.as_deref(), Some("192.168.1.5"));
}

#[tokio::test]
async fn create_posts_custom_fields_and_reads_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/hardware"))
        .and(body_partial_json(json!({
            "asset_tag": "NET-DDEEFF",
            "model_id": 8,
            "status_id": 2,
            "_snipeit_mac_address_1": "AA:BB:CC:DD:EE:FF",
            "_snipeit_ip_address_2": "192.168.1.5"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "messages": "Asset created successfully.",
            "payload": asset(42, "AA:BB:CC:DD:EE:FF", "192.168.1.5")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RestInventory::new(&config(&server)).unwrap();
    let device = DiscoveredDevice::new(
        "192.168.1.5".parse().unwrap(),
        Some(normalize_mac("aa:bb:cc:dd:ee:ff").unwrap()),
    );
    let created = backend.create(&device.to_new_record()).await.unwrap();

    assert_eq!(created.id, Some(RecordId::from(42)));
    assert_eq!(created.label(), "asset-42 (#42)");
}

#[tokio::test]
async fn error_envelope_becomes_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/hardware"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "messages": {"asset_tag": ["The asset tag must be unique."]},
            "payload": null
        })))
        .mount(&server)
        .await;

    let backend = RestInventory::new(&config(&server)).unwrap();
    let device = DiscoveredDevice::new("192.168.1.9".parse().unwrap(), None);
    let err = backend.create(&device.to_new_record()).await.unwrap_err();

    match err {
        InventoryError::Validation { message, errors } => {
            assert!(message.starts_with("Validation error"));
            assert_eq!(errors["asset_tag"], vec!["The asset tag must be unique."]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn update_patches_the_ip_field() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/hardware/17"))
        .and(body_partial_json(json!({"_snipeit_ip_address_2": "10.0.0.9"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "payload": asset(17, "02:00:00:00:00:17", "10.0.0.9")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = RestInventory::new(&config(&server)).unwrap();
    let updated = backend
        .update(&RecordId::from(17), &RecordUpdate::ip("10.0.0.9"))
        .await
        .unwrap();
    assert_eq!(updated.ip_address.as_deref(), Some("10.0.0.9"));
}

#[tokio::test]
async fn missing_tag_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/hardware/bytag/NET-000000"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let backend = RestInventory::new(&config(&server)).unwrap();
    assert!(backend.get_by_tag("NET-000000").await.unwrap().is_none());
}

#[tokio::test]
async fn unscoped_listing_drops_the_default_category() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/hardware"))
        .and(query_param("category_id", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0, "rows": []})))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/hardware"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "rows": [asset(9, "AA:BB:CC:00:00:09", "192.168.1.9")]
        })))
        .mount(&server)
        .await;

    let backend = RestInventory::new(&config(&server)).unwrap();
    assert!(backend.list_all(&RecordFilter::default()).await.unwrap().is_empty());

    let everything = backend.list_all(&RecordFilter::unscoped()).await.unwrap();
    assert_eq!(everything.len(), 1);
    assert_eq!(everything[0].name, "asset-9");
}
