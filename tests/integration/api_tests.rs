//! API integration tests against a running server
//!
//! Run with: cargo test --test api_tests -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Register a throwaway account and return a bearer token for it
async fn get_auth_token(client: &Client) -> String {
    let username = format!("it-{}", std::process::id());
    client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({
            "name": "Integration",
            "username": username,
            "email": "integration@example.com",
            "password": "integration-pass"
        }))
        .send()
        .await
        .expect("Failed to send registration request");

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "integration-pass"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

async fn create_book(client: &Client, token: &str) -> Value {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .bearer_auth(token)
        .json(&json!({
            "title": "Dune",
            "pages": 600,
            "price": 29.9,
            "available": true
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "nobody",
            "password": "wrong-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_patch_book_price_as_text() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let book = create_book(&client, &token).await;
    let id = book["id"].as_i64().expect("No id");

    let response = client
        .patch(format!("{}/books/{}", BASE_URL, id))
        .bearer_auth(&token)
        .json(&json!({"price": "25.0", "notAField": 123}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["price"], 25.0);
    assert_eq!(body["title"], "Dune");
}

#[tokio::test]
#[ignore]
async fn test_patch_loan_with_missing_book() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let book = create_book(&client, &token).await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Prestamo X",
            "customerName": "Alice",
            "loanDate": "2024-01-15",
            "quantity": 2,
            "bookId": book["id"]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.expect("Failed to parse response");

    let response = client
        .patch(format!("{}/loans/{}", BASE_URL, loan["id"]))
        .bearer_auth(&token)
        .json(&json!({"bookId": i64::MAX}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let response = client
        .get(format!("{}/loans/{}", BASE_URL, loan["id"]))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    let stored: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(stored["bookId"], book["id"]);
}
