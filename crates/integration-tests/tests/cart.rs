//! Cart tests.
//!
//! Run with: `cargo test -p rentmyfit-integration-tests -- --ignored`

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use rentmyfit_integration_tests::{TestUser, client, create_product, delete_product, url};

async fn send(
    client: &Client,
    user: &TestUser,
    method: reqwest::Method,
    path: &str,
    body: Value,
) -> (StatusCode, Value) {
    let resp = client
        .request(method, url(path))
        .bearer_auth(&user.token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send");
    let status = resp.status();
    (status, resp.json().await.expect("Invalid body"))
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_repeated_add_merges_quantity() {
    let client = client();
    let user = TestUser::create(&client).await;
    let product = create_product(&client, "Merge Test Saree").await;

    let line = |qty: u32| json!({"product": product, "selectedSize": "M", "quantity": qty});
    let (status, body) =
        send(&client, &user, reqwest::Method::POST, "/api/auth/cart", line(2)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Added to cart");

    let (_, body) = send(&client, &user, reqwest::Method::POST, "/api/auth/cart", line(3)).await;
    let cart = body["cart"].as_array().expect("cart is an array");
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0]["quantity"], 5);
    assert_eq!(cart[0]["selectedSize"], "M");

    // Same product, different size is a separate line
    let (_, body) = send(
        &client,
        &user,
        reqwest::Method::POST,
        "/api/auth/cart",
        json!({"product": product, "selectedSize": "L"}),
    )
    .await;
    assert_eq!(body["cart"].as_array().map(Vec::len), Some(2));

    user.delete(&client).await;
    delete_product(&client, &product).await;
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_add_requires_product_and_size() {
    let client = client();
    let user = TestUser::create(&client).await;

    let (status, body) = send(
        &client,
        &user,
        reqwest::Method::POST,
        "/api/auth/cart",
        json!({"product": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Product ID and selected size are required");

    user.delete(&client).await;
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_update_and_remove_missing_line_are_noops() {
    let client = client();
    let user = TestUser::create(&client).await;
    let product = create_product(&client, "Noop Test Kurta").await;

    send(
        &client,
        &user,
        reqwest::Method::POST,
        "/api/auth/cart",
        json!({"product": product, "selectedSize": "S", "quantity": 1}),
    )
    .await;

    let (status, body) = send(
        &client,
        &user,
        reqwest::Method::PUT,
        "/api/auth/cart/update",
        json!({"product": product, "selectedSize": "XL", "quantity": 9}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cart updated");
    assert_eq!(body["cart"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["cart"][0]["quantity"], 1);

    let (status, body) = send(
        &client,
        &user,
        reqwest::Method::DELETE,
        "/api/auth/cart",
        json!({"product": product, "selectedSize": "XL"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Removed from cart");
    assert_eq!(body["cart"].as_array().map(Vec::len), Some(1));

    let (_, body) = send(
        &client,
        &user,
        reqwest::Method::PUT,
        "/api/auth/cart/update",
        json!({"product": product, "selectedSize": "S", "quantity": 4}),
    )
    .await;
    assert_eq!(body["cart"][0]["quantity"], 4);

    user.delete(&client).await;
    delete_product(&client, &product).await;
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_overwrite_replaces_cart() {
    let client = client();
    let user = TestUser::create(&client).await;
    let first = create_product(&client, "Overwrite Old").await;
    let second = create_product(&client, "Overwrite New").await;

    send(
        &client,
        &user,
        reqwest::Method::POST,
        "/api/auth/cart",
        json!({"product": first, "selectedSize": "M", "quantity": 2}),
    )
    .await;

    let (status, body) = send(
        &client,
        &user,
        reqwest::Method::PUT,
        "/api/auth/cart/overwrite",
        json!({"cart": [{"product": second, "selectedSize": "L", "quantity": 1}]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cart overwritten");
    let cart = body["cart"].as_array().expect("cart is an array");
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0]["product"], second);

    let (status, body) = send(
        &client,
        &user,
        reqwest::Method::PUT,
        "/api/auth/cart/overwrite",
        json!({"cart": []}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cart"], json!([]));

    let (status, body) = send(
        &client,
        &user,
        reqwest::Method::PUT,
        "/api/auth/cart/overwrite",
        json!({"cart": "nope"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cart must be an array");

    user.delete(&client).await;
    delete_product(&client, &first).await;
    delete_product(&client, &second).await;
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_get_cart_populates_and_tolerates_deleted_products() {
    let client = client();
    let user = TestUser::create(&client).await;
    let kept = create_product(&client, "Populate Kept").await;
    let gone = create_product(&client, "Populate Gone").await;

    for product in [&kept, &gone] {
        send(
            &client,
            &user,
            reqwest::Method::POST,
            "/api/auth/cart",
            json!({"product": product, "selectedSize": "M"}),
        )
        .await;
    }
    delete_product(&client, &gone).await;

    let resp = client
        .get(url("/api/auth/cart"))
        .bearer_auth(&user.token)
        .send()
        .await
        .expect("Failed to get cart");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Invalid body");
    let cart = body["cart"].as_array().expect("cart is an array");

    assert_eq!(cart.len(), 2);
    assert_eq!(cart[0]["product"]["_id"], kept);
    assert_eq!(cart[0]["product"]["name"], "Populate Kept");
    assert!(cart[1]["product"].is_null());
    assert_eq!(cart[1]["quantity"], 1);

    user.delete(&client).await;
    delete_product(&client, &kept).await;
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_non_id_product_is_a_miss_on_remove_and_update() {
    let client = client();
    let user = TestUser::create(&client).await;
    let product = create_product(&client, "Miss Test Kurta").await;

    send(
        &client,
        &user,
        reqwest::Method::POST,
        "/api/auth/cart",
        json!({"product": product, "selectedSize": "M", "quantity": 2}),
    )
    .await;

    let (status, body) = send(
        &client,
        &user,
        reqwest::Method::DELETE,
        "/api/auth/cart",
        json!({"product": "P1", "selectedSize": "XL"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Removed from cart");
    assert_eq!(body["cart"].as_array().map(Vec::len), Some(1));

    let (status, body) = send(
        &client,
        &user,
        reqwest::Method::PUT,
        "/api/auth/cart/update",
        json!({"product": "507f1f77bcf86cd799439011", "selectedSize": "M", "quantity": 9}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cart updated");
    assert_eq!(body["cart"][0]["quantity"], 2);

    // Adding still insists on a real id
    let (status, body) = send(
        &client,
        &user,
        reqwest::Method::POST,
        "/api/auth/cart",
        json!({"product": "P1", "selectedSize": "M"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid product ID");

    user.delete(&client).await;
    delete_product(&client, &product).await;
}
