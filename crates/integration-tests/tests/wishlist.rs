//! Wishlist tests.
//!
//! Run with: `cargo test -p rentmyfit-integration-tests -- --ignored`

use reqwest::StatusCode;
use serde_json::{Value, json};

use rentmyfit_integration_tests::{TestUser, client, create_product, delete_product, url};

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_add_is_idempotent() {
    let client = client();
    let user = TestUser::create(&client).await;
    let product = create_product(&client, "Wishlist Lehenga").await;

    for _ in 0..2 {
        let resp = client
            .post(url("/api/auth/wishlist/add"))
            .bearer_auth(&user.token)
            .json(&json!({"productId": product}))
            .send()
            .await
            .expect("Failed to add to wishlist");
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await.expect("Invalid body");
        assert_eq!(body["message"], "Added to wishlist");
        assert_eq!(body["wishlist"], json!([product]));
    }

    let resp = client
        .get(url("/api/auth/wishlist"))
        .bearer_auth(&user.token)
        .send()
        .await
        .expect("Failed to get wishlist");
    let body: Value = resp.json().await.expect("Invalid body");
    let wishlist = body["wishlist"].as_array().expect("wishlist is an array");
    assert_eq!(wishlist.len(), 1);
    assert_eq!(wishlist[0]["name"], "Wishlist Lehenga");

    user.delete(&client).await;
    delete_product(&client, &product).await;
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_add_requires_product_id() {
    let client = client();
    let user = TestUser::create(&client).await;

    let resp = client
        .post(url("/api/auth/wishlist/add"))
        .bearer_auth(&user.token)
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Invalid body");
    assert_eq!(body["message"], "Product ID is required");

    user.delete(&client).await;
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_remove_absent_is_noop() {
    let client = client();
    let user = TestUser::create(&client).await;
    let product = create_product(&client, "Wishlist Remove").await;

    client
        .post(url("/api/auth/wishlist/add"))
        .bearer_auth(&user.token)
        .json(&json!({"productId": product}))
        .send()
        .await
        .expect("Failed to add to wishlist");

    let resp = client
        .delete(url(&format!("/api/auth/wishlist/{product}")))
        .bearer_auth(&user.token)
        .send()
        .await
        .expect("Failed to remove");
    let body: Value = resp.json().await.expect("Invalid body");
    assert_eq!(body["message"], "Removed from wishlist");
    assert_eq!(body["wishlist"], json!([]));

    // Second removal still succeeds
    let resp = client
        .delete(url(&format!("/api/auth/wishlist/{product}")))
        .bearer_auth(&user.token)
        .send()
        .await
        .expect("Failed to remove again");
    assert_eq!(resp.status(), StatusCode::OK);

    user.delete(&client).await;
    delete_product(&client, &product).await;
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_deleted_products_are_skipped() {
    let client = client();
    let user = TestUser::create(&client).await;
    let product = create_product(&client, "Wishlist Dangling").await;

    client
        .post(url("/api/auth/wishlist/add"))
        .bearer_auth(&user.token)
        .json(&json!({"productId": product}))
        .send()
        .await
        .expect("Failed to add to wishlist");
    delete_product(&client, &product).await;

    let resp = client
        .get(url("/api/auth/wishlist"))
        .bearer_auth(&user.token)
        .send()
        .await
        .expect("Failed to get wishlist");
    let body: Value = resp.json().await.expect("Invalid body");
    assert_eq!(body["wishlist"], json!([]));

    user.delete(&client).await;
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_remove_non_id_is_a_miss() {
    let client = client();
    let user = TestUser::create(&client).await;
    let product = create_product(&client, "Miss Test Anarkali").await;

    let resp = client
        .post(url("/api/auth/wishlist/add"))
        .bearer_auth(&user.token)
        .json(&json!({"productId": product}))
        .send()
        .await
        .expect("Failed to add");
    assert_eq!(resp.status(), StatusCode::OK);

    for segment in ["abc", "507f1f77bcf86cd799439011"] {
        let resp = client
            .delete(url(&format!("/api/auth/wishlist/{segment}")))
            .bearer_auth(&user.token)
            .send()
            .await
            .expect("Failed to remove");
        assert_eq!(resp.status(), StatusCode::OK, "{segment}");
        let body: Value = resp.json().await.expect("Invalid body");
        assert_eq!(body["message"], "Removed from wishlist");
        assert_eq!(body["wishlist"], json!([product]));
    }

    let resp = client
        .post(url("/api/auth/wishlist/add"))
        .bearer_auth(&user.token)
        .json(&json!({"productId": "abc"}))
        .send()
        .await
        .expect("Failed to add");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    user.delete(&client).await;
    delete_product(&client, &product).await;
}
