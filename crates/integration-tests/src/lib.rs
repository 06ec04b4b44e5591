//! Integration tests for the RentMyFit API.
//!
//! These tests drive a running server over HTTP. They require:
//! - A migrated `PostgreSQL` database (`rmf-cli migrate`)
//! - The API running (`cargo run -p rentmyfit-api`)
//!
//! Run with: `cargo test -p rentmyfit-integration-tests -- --ignored`
//!
//! `API_BASE_URL` overrides the default `http://localhost:5000`.

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// Build `{base_url}{path}`.
#[must_use]
pub fn url(path: &str) -> String {
    format!("{}{path}", base_url())
}

#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// An email no other test run has used.
#[must_use]
pub fn unique_email() -> String {
    format!("it-{}@rentmyfit.test", Uuid::new_v4().simple())
}

/// A registered and logged-in account.
pub struct TestUser {
    pub email: String,
    pub password: String,
    pub token: String,
    pub id: Value,
}

impl TestUser {
    /// Register a fresh account and log it in.
    pub async fn create(client: &Client) -> Self {
        let email = unique_email();
        let password = "pw123".to_string();

        let resp = client
            .post(url("/api/auth/register"))
            .json(&json!({"name": "Ann", "email": email, "password": password}))
            .send()
            .await
            .expect("Failed to register");
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = client
            .post(url("/api/auth/login"))
            .json(&json!({"email": email, "password": password}))
            .send()
            .await
            .expect("Failed to log in");
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await.expect("Invalid login body");

        Self {
            email,
            password,
            token: body["token"].as_str().expect("token missing").to_owned(),
            id: body["user"]["id"].clone(),
        }
    }

    /// Delete the account; ignores failures so it can run in cleanup.
    pub async fn delete(&self, client: &Client) {
        let _ = client
            .delete(url("/api/auth/account"))
            .bearer_auth(&self.token)
            .send()
            .await;
    }
}

/// Create a catalog product and return its id.
pub async fn create_product(client: &Client, name: &str) -> Value {
    let resp = client
        .post(url("/api/products"))
        .json(&json!({
            "name": name,
            "category": "Ethnic",
            "sizes": ["S", "M", "L"],
            "price": 49.99,
            "image": "https://images.rentmyfit.dev/test.jpg"
        }))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("Invalid product body");
    body["_id"].clone()
}

/// Delete a catalog product; ignores failures.
pub async fn delete_product(client: &Client, id: &Value) {
    let _ = client
        .delete(url(&format!("/api/products/{id}")))
        .send()
        .await;
}
