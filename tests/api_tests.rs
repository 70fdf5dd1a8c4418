//! API integration tests
//!
//! These run against a live server with a reachable database.
//! Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Six-digit serial number unlikely to collide across test runs
fn unique_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .subsec_nanos();
    format!("{:06}", nanos % 1_000_000)
}

async fn create_book(client: &Client, id: &str, title: &str, author: &str) -> reqwest::Response {
    client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "id": id, "title": title, "author": author }))
        .send()
        .await
        .expect("Failed to send create request")
}

fn link_rels(body: &Value) -> Vec<&str> {
    body["_links"]
        .as_array()
        .expect("_links should be an array")
        .iter()
        .filter_map(|l| l["rel"].as_str())
        .collect()
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
async fn test_root_message() {
    let client = Client::new();

    let response = client
        .get("http://localhost:8080/")
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Library server is running!");
}

#[tokio::test]
#[ignore]
async fn test_create_book() {
    let client = Client::new();
    let id = unique_id();

    let response = create_book(&client, &id, "Silmarillion", "J.R.R. Tolkien").await;
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["title"], "Silmarillion");
    assert_eq!(body["author"], "J.R.R. Tolkien");
    assert!(body["reader"].is_null());
    assert!(body["borrowing_time"].is_null());

    let rels = link_rels(&body);
    assert!(rels.contains(&"self"));
    assert!(rels.contains(&"delete"));
    assert!(rels.contains(&"borrow"));
    assert!(rels.contains(&"return"));
    // borrow overwrites the generic update link
    assert!(!rels.contains(&"update"));
}

#[tokio::test]
#[ignore]
async fn test_create_duplicate_is_rejected() {
    let client = Client::new();
    let id = unique_id();

    let first = create_book(&client, &id, "Dune", "Frank Herbert").await;
    assert_eq!(first.status(), 201);

    let second = create_book(&client, &id, "Dune", "Frank Herbert").await;
    assert_eq!(second.status(), 400);

    let body: Value = second.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "Book with that identifier already exists.");
}

#[tokio::test]
#[ignore]
async fn test_create_with_bad_serial_number() {
    let client = Client::new();

    let response = create_book(&client, "123", "Too Short", "Anon").await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "Serial number should be 6 digits long.");
}

#[tokio::test]
#[ignore]
async fn test_get_missing_book() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "Book not found.");
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let client = Client::new();
    let id = unique_id();
    create_book(&client, &id, "The Hobbit", "J.R.R. Tolkien").await;

    let response = client
        .get(format!("{}/books?page=1&limit=10", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());

    let rels = link_rels(&body);
    assert!(rels.contains(&"self"));
    assert!(rels.contains(&"next"));
    // first page carries no prev link
    assert!(!rels.contains(&"prev"));
}

#[tokio::test]
#[ignore]
async fn test_list_books_filtered_by_author() {
    let client = Client::new();
    let id = unique_id();
    let author = format!("Unique Author {}", id);
    create_book(&client, &id, "Only Book", &author).await;

    let response = client
        .get(format!("{}/books", BASE_URL))
        .query(&[("author", author.as_str())])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let items = body["items"].as_array().expect("items should be an array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], id.as_str());
}

#[tokio::test]
#[ignore]
async fn test_list_books_with_unknown_sort_column() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books?sort_by=colour", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "Book doesn't have such an attribute.");
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_return_flow() {
    let client = Client::new();
    let id = unique_id();
    create_book(&client, &id, "Left Hand of Darkness", "Ursula K. Le Guin").await;

    // Borrow with an explicit timestamp
    let response = client
        .patch(format!("{}/books/{}/borrow", BASE_URL, id))
        .json(&json!({
            "reader": "123456",
            "borrowing_time": "1954-07-29T12:00:00.1+00:00"
        }))
        .send()
        .await
        .expect("Failed to send borrow request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["reader"], "123456");
    let time = body["borrowing_time"]
        .as_str()
        .expect("borrowing_time should be set");
    assert!(time.starts_with("1954-07-29"));

    let rels = link_rels(&body);
    assert!(rels.contains(&"borrow"));
    assert!(!rels.contains(&"update"));

    // Return it; borrower fields go back to null
    let response = client
        .post(format!("{}/books/{}/return", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send return request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"], id.as_str());
    assert!(body["reader"].is_null());
    assert!(body["borrowing_time"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_borrow_defaults_time_to_now() {
    let client = Client::new();
    let id = unique_id();
    create_book(&client, &id, "Solaris", "Stanisław Lem").await;

    let response = client
        .patch(format!("{}/books/{}/borrow", BASE_URL, id))
        .json(&json!({ "reader": "654321" }))
        .send()
        .await
        .expect("Failed to send borrow request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["reader"], "654321");
    assert!(body["borrowing_time"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_delete_book() {
    let client = Client::new();
    let id = unique_id();
    create_book(&client, &id, "Disposable", "Anon").await;

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send delete request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["title"], "Disposable");

    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}
