#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use roomwatch_server::app::create_app;
use roomwatch_server::configs::MemoryStorage;
use roomwatch_server::repositories::SnapshotRepository;
use roomwatch_server::services::RegistryService;

pub struct MockApp {
    pub storage: Arc<MemoryStorage>,
    pub registry_service: Arc<RegistryService>,
    pub router: Router,
}

impl MockApp {
    pub async fn new() -> Self {
        Self::with_storage(MemoryStorage::new()).await
    }

    pub async fn with_storage(storage: MemoryStorage) -> Self {
        let storage = Arc::new(storage);
        let registry_service = Arc::new(
            RegistryService::load(SnapshotRepository::new(storage.clone()))
                .await
                .unwrap(),
        );
        let router = create_app(registry_service.clone());

        Self {
            storage,
            registry_service,
            router,
        }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).method(method);
        let request = match body {
            Some(body) => request
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };

        (status, value)
    }

    pub async fn create_test_room(&self, number: &str) -> Value {
        let (status, room) = self
            .send(Method::POST, "/rooms", Some(room_body(number)))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        room
    }

    pub async fn create_test_device(&self, room_id: &str) -> Value {
        let (status, device) = self
            .send(Method::POST, "/devices", Some(device_body(room_id)))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        device
    }
}

pub fn room_body(number: &str) -> Value {
    json!({
        "number": number,
        "floor": "1",
        "buildingName": "Main",
        "openingHours": "9-17"
    })
}

pub fn device_body(room_id: &str) -> Value {
    json!({
        "ip": "10.0.0.1",
        "port": 1883,
        "endpoints": { "mqtt": { "topics": [format!("{room_id}/PM2.5")] } },
        "availableResources": ["PM2.5"],
        "roomID": room_id
    })
}

pub fn user_body(rooms: Vec<Value>) -> Value {
    json!({
        "name": "Ada",
        "surname": "Lovelace",
        "email": "ada@example.com",
        "telegramChatID": 123456789,
        "rooms": rooms
    })
}
