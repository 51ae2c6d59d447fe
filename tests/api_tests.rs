//! API integration tests
//!
//! Run against a live server with a clean database:
//! `cargo test -- --ignored`

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:3000";

async fn create_book(client: &Client, isbn: &str, quantity: i32) {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Test Book",
            "author": "John Doe",
            "isbn": isbn,
            "quantity": quantity,
            "shelf": "A1"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
}

async fn create_borrower(client: &Client, email: &str) {
    let response = client
        .post(format!("{}/borrower", BASE_URL))
        .json(&json!({
            "name": "Test Borrower",
            "email": email,
            "password": "long-enough-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
}

async fn book_quantity(client: &Client, isbn: &str) -> i64 {
    let response = client
        .get(format!("{}/books?isbn={}", BASE_URL, isbn))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    body[0]["quantity"].as_i64().expect("No quantity in response")
}

async fn open_borrows(client: &Client, email: &str) -> Vec<Value> {
    let response = client
        .post(format!("{}/borrower/check", BASE_URL))
        .json(&json!({ "email": email }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    body.as_array().expect("Expected an array").clone()
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
async fn test_create_and_delete_book() {
    let client = Client::new();
    create_book(&client, "978-0-00-000001-0", 3).await;

    let response = client
        .delete(format!("{}/books/978-0-00-000001-0", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);

    // A second delete has nothing left to remove
    let response = client
        .delete(format!("{}/books/978-0-00-000001-0", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_isbn_is_rejected() {
    let client = Client::new();
    create_book(&client, "978-0-00-000002-0", 3).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Other Title",
            "author": "Jane Doe",
            "isbn": "978-0-00-000002-0",
            "quantity": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    // Still exactly one row for that ISBN
    let response = client
        .get(format!("{}/books?isbn=978-0-00-000002-0", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body.as_array().expect("Expected an array").len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_negative_quantity_is_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Invalid Book",
            "author": "Jane Doe",
            "isbn": "978-0-00-000003-0",
            "quantity": -5
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_listing_unknown_book_returns_404() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books?isbn=no-such-isbn", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_return_round_trip() {
    let client = Client::new();
    create_book(&client, "978-0-00-000004-0", 10).await;
    create_borrower(&client, "roundtrip@example.org").await;

    // Borrow: quantity drops to 9 and one open transaction appears
    let response = client
        .post(format!("{}/books/borrow", BASE_URL))
        .json(&json!({
            "email": "roundtrip@example.org",
            "isbn": "978-0-00-000004-0"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    assert_eq!(book_quantity(&client, "978-0-00-000004-0").await, 9);

    let borrows = open_borrows(&client, "roundtrip@example.org").await;
    assert_eq!(borrows.len(), 1);
    assert_eq!(borrows[0]["isbn"], "978-0-00-000004-0");
    assert_eq!(borrows[0]["title"], "Test Book");

    // Return: quantity restored and the transaction closed
    let response = client
        .post(format!("{}/books/return", BASE_URL))
        .json(&json!({
            "email": "roundtrip@example.org",
            "isbn": "978-0-00-000004-0"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    assert_eq!(book_quantity(&client, "978-0-00-000004-0").await, 10);
    assert!(open_borrows(&client, "roundtrip@example.org").await.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_borrow_with_missing_field_returns_400() {
    let client = Client::new();

    // No email in the body: rejected as a validation error, not a framework
    // default rejection
    let response = client
        .post(format!("{}/books/borrow", BASE_URL))
        .json(&json!({ "isbn": "978-0-00-000001-0" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_return_closes_only_the_oldest_open_borrow() {
    let client = Client::new();
    create_book(&client, "978-0-00-000009-0", 5).await;
    create_borrower(&client, "twiceover@example.org").await;

    // Two open borrows of the same book, told apart by their due dates
    let first_due = Utc::now() + Duration::days(5);
    let second_due = Utc::now() + Duration::days(10);

    for due in [&first_due, &second_due] {
        let response = client
            .post(format!("{}/books/borrow", BASE_URL))
            .json(&json!({
                "email": "twiceover@example.org",
                "isbn": "978-0-00-000009-0",
                "due_date": due.to_rfc3339()
            }))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), 201);
    }

    assert_eq!(book_quantity(&client, "978-0-00-000009-0").await, 3);
    assert_eq!(open_borrows(&client, "twiceover@example.org").await.len(), 2);

    // One return closes the borrow with the earlier borrow date; the newer
    // one stays open
    let response = client
        .post(format!("{}/books/return", BASE_URL))
        .json(&json!({
            "email": "twiceover@example.org",
            "isbn": "978-0-00-000009-0"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    assert_eq!(book_quantity(&client, "978-0-00-000009-0").await, 4);

    let remaining = open_borrows(&client, "twiceover@example.org").await;
    assert_eq!(remaining.len(), 1);

    let remaining_due: DateTime<Utc> = remaining[0]["due_date"]
        .as_str()
        .expect("No due date in response")
        .parse()
        .expect("Unparseable due date");
    // Timestamps lose sub-microsecond precision in the database
    assert!((remaining_due - second_due).num_milliseconds().abs() < 10);
}

#[tokio::test]
#[ignore]
async fn test_borrow_with_no_copies_is_rejected() {
    let client = Client::new();
    create_book(&client, "978-0-00-000005-0", 0).await;
    create_borrower(&client, "nocopies@example.org").await;

    let response = client
        .post(format!("{}/books/borrow", BASE_URL))
        .json(&json!({
            "email": "nocopies@example.org",
            "isbn": "978-0-00-000005-0"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    // No state change
    assert_eq!(book_quantity(&client, "978-0-00-000005-0").await, 0);
    assert!(open_borrows(&client, "nocopies@example.org").await.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_borrow_unknown_book_returns_404() {
    let client = Client::new();
    create_borrower(&client, "unknownbook@example.org").await;

    let response = client
        .post(format!("{}/books/borrow", BASE_URL))
        .json(&json!({
            "email": "unknownbook@example.org",
            "isbn": "no-such-isbn"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_due_date_beyond_maximum_window_is_rejected() {
    let client = Client::new();
    create_book(&client, "978-0-00-000006-0", 5).await;
    create_borrower(&client, "latecomer@example.org").await;

    // Far beyond any configured maximum borrow window
    let response = client
        .post(format!("{}/books/borrow", BASE_URL))
        .json(&json!({
            "email": "latecomer@example.org",
            "isbn": "978-0-00-000006-0",
            "due_date": "2099-01-01T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    assert_eq!(book_quantity(&client, "978-0-00-000006-0").await, 5);
}

#[tokio::test]
#[ignore]
async fn test_return_without_open_borrow_returns_404() {
    let client = Client::new();
    create_book(&client, "978-0-00-000007-0", 5).await;
    create_borrower(&client, "noborrow@example.org").await;

    let response = client
        .post(format!("{}/books/return", BASE_URL))
        .json(&json!({
            "email": "noborrow@example.org",
            "isbn": "978-0-00-000007-0"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    // The quantity is untouched when no open borrow matches
    assert_eq!(book_quantity(&client, "978-0-00-000007-0").await, 5);
}

#[tokio::test]
#[ignore]
async fn test_borrower_validation() {
    let client = Client::new();

    // Malformed email
    let response = client
        .post(format!("{}/borrower", BASE_URL))
        .json(&json!({
            "name": "Bad Email",
            "email": "not-an-email",
            "password": "long-enough-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    // Short password
    let response = client
        .post(format!("{}/borrower", BASE_URL))
        .json(&json!({
            "name": "Short Password",
            "email": "short@example.org",
            "password": "short"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_overdue_listing_is_empty_without_overdues() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/overdue?isbn=no-such-isbn", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    // Unlike the entity listings, overdue reports an empty window as 200
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.as_array().expect("Expected an array").is_empty());
}

#[tokio::test]
#[ignore]
async fn test_update_book_partial_fields() {
    let client = Client::new();
    create_book(&client, "978-0-00-000008-0", 2).await;

    let response = client
        .put(format!("{}/books/978-0-00-000008-0", BASE_URL))
        .json(&json!({ "shelf": "B2" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["shelf"], "B2");
    assert_eq!(body["title"], "Test Book");
    assert_eq!(body["quantity"], 2);
}
