use axum::http::{Method, StatusCode};
use serde_json::json;

use roomwatch_server::configs::MemoryStorage;
use roomwatch_server::models::Collection;

mod common;
use common::mock_app::{MockApp, device_body, room_body};

#[tokio::test]
async fn test_room_device_cascade_scenario() {
    let app = MockApp::new().await;

    let (status, room) = app.send(Method::POST, "/rooms", Some(room_body("101"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let room_id = room["roomID"].as_str().unwrap().to_string();

    let (status, device) = app
        .send(Method::POST, "/devices", Some(device_body(&room_id)))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let device_id = device["deviceID"].as_str().unwrap().to_string();
    assert_eq!(
        device["endpoints"]["mqtt"]["topics"],
        json!([format!("{room_id}/PM2.5")])
    );

    let (_, room) = app
        .send(Method::GET, &format!("/rooms/{room_id}"), None)
        .await;
    assert_eq!(room["devices"], json!([device_id]));

    let (status, _) = app
        .send(Method::DELETE, &format!("/rooms/{room_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, error) = app
        .send(Method::GET, &format!("/devices/{device_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        error["error"]["message"],
        json!(format!("Device {device_id} not found"))
    );

    let devices = app.storage.snapshot(Collection::Devices).await.unwrap();
    assert_eq!(devices, json!([]));
    let rooms = app.storage.snapshot(Collection::Rooms).await.unwrap();
    assert_eq!(rooms, json!([]));
}

#[tokio::test]
async fn test_get_broker() {
    let storage = MemoryStorage::new()
        .with_snapshot(Collection::Broker, json!({ "ip": "mqtt.local", "port": 1883 }));
    let app = MockApp::with_storage(storage).await;

    let (status, broker) = app.send(Method::GET, "/broker", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(broker, json!({ "ip": "mqtt.local", "port": 1883 }));
}

#[tokio::test]
async fn test_get_broker_not_configured() {
    let app = MockApp::new().await;

    let (status, error) = app.send(Method::GET, "/broker", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"]["message"], json!("Broker not configured"));
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let app = MockApp::new().await;
    let room = app.create_test_room("101").await;
    app.storage.fail_writes(Collection::Devices, true).await;

    let (status, error) = app
        .send(
            Method::POST,
            "/devices",
            Some(device_body(room["roomID"].as_str().unwrap())),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error["error"]["code"], json!(500));
    assert_eq!(error["error"]["message"], json!("Internal server error"));
    assert!(error["error"]["error_id"].is_string());

    let (_, devices) = app.send(Method::GET, "/devices", None).await;
    assert_eq!(devices, json!([]));
    let (_, rooms) = app.send(Method::GET, "/rooms", None).await;
    assert_eq!(rooms[0]["devices"], json!([]));
}

#[tokio::test]
async fn test_openapi_document() {
    let app = MockApp::new().await;

    let (status, document) = app.send(Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(document["paths"]["/devices/{device_id}"].is_object());
    assert!(document["paths"]["/broker"]["get"].is_object());
    assert!(document["components"]["schemas"]["Device"].is_object());
}
