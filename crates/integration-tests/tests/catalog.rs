//! Product and order tests.
//!
//! Run with: `cargo test -p rentmyfit-integration-tests -- --ignored`

use reqwest::StatusCode;
use serde_json::{Value, json};

use rentmyfit_integration_tests::{TestUser, client, create_product, delete_product, url};

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_product_crud() {
    let client = client();
    let id = create_product(&client, "Catalog Sherwani").await;

    let resp = client
        .get(url(&format!("/api/products/{id}")))
        .send()
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::OK);
    let product: Value = resp.json().await.expect("Invalid body");
    assert_eq!(product["price"], 49.99);
    assert_eq!(product["availability"], true);

    let resp = client
        .put(url(&format!("/api/products/{id}")))
        .json(&json!({"availability": false, "price": 39.5}))
        .send()
        .await
        .expect("Failed to update product");
    let product: Value = resp.json().await.expect("Invalid body");
    assert_eq!(product["availability"], false);
    assert_eq!(product["price"], 39.5);
    assert_eq!(product["name"], "Catalog Sherwani");

    let resp = client
        .delete(url(&format!("/api/products/{id}")))
        .send()
        .await
        .expect("Failed to delete product");
    let body: Value = resp.json().await.expect("Invalid body");
    assert_eq!(body["message"], "Deleted successfully");

    let resp = client
        .get(url(&format!("/api/products/{id}")))
        .send()
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .delete(url(&format!("/api/products/{id}")))
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_invalid_product_id() {
    let resp = client()
        .get(url("/api/products/invalid123"))
        .send()
        .await
        .expect("Failed to send");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Invalid body");
    assert_eq!(body["message"], "Invalid product ID");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_order_lifecycle_with_population() {
    let client = client();
    let user = TestUser::create(&client).await;
    let product = create_product(&client, "Order Gown").await;

    let resp = client
        .post(url("/api/orders"))
        .json(&json!({
            "userId": user.id,
            "productId": product,
            "size": "M",
            "quantity": 1,
            "rentalDate": "2025-08-01",
            "returnDate": "2025-08-04"
        }))
        .send()
        .await
        .expect("Failed to create order");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("Invalid body");
    assert_eq!(order["size"], "M");
    assert_eq!(order["status"], "Pending");
    let order_id = order["_id"].clone();

    let resp = client
        .get(url(&format!("/api/orders/{order_id}")))
        .send()
        .await
        .expect("Failed to get order");
    let populated: Value = resp.json().await.expect("Invalid body");
    assert_eq!(populated["userId"]["email"], user.email.as_str());
    assert_eq!(populated["productId"]["name"], "Order Gown");

    let resp = client
        .put(url(&format!("/api/orders/{order_id}")))
        .json(&json!({"status": "Shipped"}))
        .send()
        .await
        .expect("Failed to update order");
    let updated: Value = resp.json().await.expect("Invalid body");
    assert_eq!(updated["status"], "Shipped");

    // Deleting the product leaves the order listed with a null reference
    delete_product(&client, &product).await;
    let resp = client
        .get(url("/api/orders"))
        .send()
        .await
        .expect("Failed to list orders");
    let orders: Value = resp.json().await.expect("Invalid body");
    let listed = orders
        .as_array()
        .expect("orders is an array")
        .iter()
        .find(|o| o["_id"] == order_id)
        .expect("order listed");
    assert!(listed["productId"].is_null());

    for _ in 0..2 {
        let resp = client
            .delete(url(&format!("/api/orders/{order_id}")))
            .send()
            .await
            .expect("Failed to delete order");
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await.expect("Invalid body");
        assert_eq!(body["message"], "Order deleted");
    }

    let resp = client
        .put(url(&format!("/api/orders/{order_id}")))
        .json(&json!({"status": "Returned"}))
        .send()
        .await
        .expect("Failed to send");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    user.delete(&client).await;
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_order_update_checks_dates_against_stored_row() {
    let client = client();
    let user = TestUser::create(&client).await;
    let product = create_product(&client, "Dated Lehenga").await;

    let resp = client
        .post(url("/api/orders"))
        .json(&json!({
            "userId": user.id,
            "productId": product,
            "size": "S",
            "quantity": 1,
            "rentalDate": "2025-09-10",
            "returnDate": "2025-09-12"
        }))
        .send()
        .await
        .expect("Failed to create order");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("Invalid body");
    let order_id = order["_id"].clone();

    let resp = client
        .put(url(&format!("/api/orders/{order_id}")))
        .json(&json!({"returnDate": "2025-09-01"}))
        .send()
        .await
        .expect("Failed to update order");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Invalid body");
    assert_eq!(body["message"], "Return date cannot be before rental date");

    let resp = client
        .put(url(&format!("/api/orders/{order_id}")))
        .json(&json!({"returnDate": "2025-09-15"}))
        .send()
        .await
        .expect("Failed to update order");
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.expect("Invalid body");
    assert_eq!(updated["returnDate"], "2025-09-15");
    assert_eq!(updated["rentalDate"], "2025-09-10");

    let _ = client
        .delete(url(&format!("/api/orders/{order_id}")))
        .send()
        .await;
    delete_product(&client, &product).await;
    user.delete(&client).await;
}
