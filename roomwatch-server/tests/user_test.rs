use axum::http::{Method, StatusCode};
use serde_json::json;

mod common;
use common::mock_app::{MockApp, user_body};

#[tokio::test]
async fn test_user_lifecycle() {
    let app = MockApp::new().await;
    let room = app.create_test_room("101").await;

    let (status, user) = app
        .send(Method::POST, "/users", Some(user_body(vec![room["roomID"].clone()])))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = user["userID"].as_str().unwrap();
    assert_eq!(user["telegramChatID"], json!(123456789));
    assert_eq!(user["rooms"], json!([room["roomID"]]));

    let mut body = user_body(vec![]);
    body["email"] = json!("ada@lovelace.org");
    let (status, updated) = app
        .send(Method::PUT, &format!("/users/{user_id}"), Some(body))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["userID"], json!(user_id));
    assert_eq!(updated["email"], json!("ada@lovelace.org"));
    assert_eq!(updated["rooms"], json!([]));

    let (status, fetched) = app
        .send(Method::GET, &format!("/users/{user_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, updated);

    let (status, _) = app
        .send(Method::DELETE, &format!("/users/{user_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, users) = app.send(Method::GET, "/users", None).await;
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn test_create_user_unknown_room() {
    let app = MockApp::new().await;

    let (status, error) = app
        .send(Method::POST, "/users", Some(user_body(vec![json!("missing")])))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"]["message"], json!("Room missing not found"));

    let (_, users) = app.send(Method::GET, "/users", None).await;
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn test_create_user_missing_field() {
    let app = MockApp::new().await;
    let mut body = user_body(vec![]);
    body.as_object_mut().unwrap().remove("telegramChatID");

    let (status, error) = app.send(Method::POST, "/users", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error["error"]["message"],
        json!("Invalid request: 'telegramChatID' is required")
    );
}
