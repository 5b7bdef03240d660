//! Integration tests for session carts.
//!
//! Run with: cargo test -p healwell-integration-tests

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::json;

use healwell_core::SessionId;
use healwell_integration_tests::TestContext;

#[tokio::test]
async fn test_add_merges_quantities() {
    let ctx = TestContext::new().with_session("session-1");

    let first = ctx
        .post("/api/cart", json!({ "medicineId": "med1", "quantity": 1 }))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["quantity"], 1);
    assert_eq!(first.body["sessionId"], "session-1");

    let second = ctx
        .post("/api/cart", json!({ "medicineId": "med1", "quantity": 2 }))
        .await;
    assert_eq!(second.status, StatusCode::CREATED);
    assert_eq!(second.body["quantity"], 3);
    assert_eq!(second.body["id"], first.body["id"]);

    let cart = ctx.get("/api/cart").await;
    let items = cart.body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 3);
    assert_eq!(items[0]["medicine"]["name"], "Paracetamol 500mg");
}

#[tokio::test]
async fn test_add_rejects_invalid_body() {
    let ctx = TestContext::new();

    let resp = ctx
        .post("/api/cart", json!({ "medicineId": "med1", "quantity": 0 }))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["message"], "Invalid cart item data");
    assert_eq!(resp.body["errors"][0]["field"], "quantity");

    let resp = ctx.post("/api/cart", json!({})).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["errors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let ctx = TestContext::new();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/cart")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let resp = ctx.send(request).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["message"], "Invalid cart item data");
}

#[tokio::test]
async fn test_update_quantity() {
    let ctx = TestContext::new().with_session("s-update");
    ctx.post("/api/cart", json!({ "medicineId": "med2", "quantity": 1 }))
        .await;

    let resp = ctx.put("/api/cart/med2", json!({ "quantity": 5 })).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["quantity"], 5);

    let resp = ctx.put("/api/cart/med2", json!({ "quantity": -1 })).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["message"], "Invalid quantity");

    let resp = ctx.put("/api/cart/med3", json!({ "quantity": 2 })).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body["message"], "Cart item not found");
}

#[tokio::test]
async fn test_update_to_zero_removes_line() {
    let ctx = TestContext::new().with_session("s-zero");
    ctx.post("/api/cart", json!({ "medicineId": "med1", "quantity": 2 }))
        .await;

    let resp = ctx.put("/api/cart/med1", json!({ "quantity": 0 })).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["message"], "Item removed from cart");

    let cart = ctx.get("/api/cart").await;
    assert!(cart.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_remove_item() {
    let ctx = TestContext::new().with_session("s-remove");
    ctx.post("/api/cart", json!({ "medicineId": "med1", "quantity": 1 }))
        .await;

    let resp = ctx.delete("/api/cart/med1").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["message"], "Item removed from cart");

    let resp = ctx.delete("/api/cart/med1").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clear_cart_is_idempotent() {
    let ctx = TestContext::new().with_session("s-clear");
    for id in ["med1", "med2", "med3"] {
        ctx.post("/api/cart", json!({ "medicineId": id, "quantity": 1 }))
            .await;
    }
    assert_eq!(ctx.get("/api/cart").await.body.as_array().unwrap().len(), 3);

    let resp = ctx.delete("/api/cart").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["message"], "Cart cleared");
    assert!(ctx.get("/api/cart").await.body.as_array().unwrap().is_empty());

    let again = ctx.delete("/api/cart").await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn test_sessions_do_not_share_carts() {
    let alice = TestContext::new().with_session("alice");
    let bob = alice.clone().with_session("bob");

    alice
        .post("/api/cart", json!({ "medicineId": "med1", "quantity": 1 }))
        .await;

    assert_eq!(alice.get("/api/cart").await.body.as_array().unwrap().len(), 1);
    assert!(bob.get("/api/cart").await.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_header_uses_anonymous_cart() {
    let ctx = TestContext::new();
    let resp = ctx
        .post("/api/cart", json!({ "medicineId": "med4", "quantity": 1 }))
        .await;
    assert_eq!(resp.body["sessionId"], SessionId::ANONYMOUS);

    let explicit = ctx.clone().with_session("");
    assert_eq!(
        explicit.get("/api/cart").await.body.as_array().unwrap().len(),
        1
    );
}

#[tokio::test]
async fn test_long_session_token_is_used_verbatim() {
    let token = "x".repeat(140);
    let ctx = TestContext::new().with_session(&token);

    let resp = ctx
        .post("/api/cart", json!({ "medicineId": "med1", "quantity": 1 }))
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["sessionId"], token.as_str());

    let cart = ctx.get("/api/cart").await;
    assert_eq!(cart.status, StatusCode::OK);
    assert_eq!(cart.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_medicine_is_accepted_but_hidden() {
    let ctx = TestContext::new().with_session("s-orphan");

    let resp = ctx
        .post("/api/cart", json!({ "medicineId": "ghost", "quantity": 1 }))
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);

    assert!(ctx.get("/api/cart").await.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_cart_summary() {
    let ctx = TestContext::new().with_session("s-summary");
    ctx.post("/api/cart", json!({ "medicineId": "med1", "quantity": 2 }))
        .await;
    ctx.post("/api/cart", json!({ "medicineId": "med4", "quantity": 1 }))
        .await;

    let resp = ctx.get("/api/cart/summary").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["itemCount"], 3);
    assert_eq!(resp.body["lineCount"], 2);
    assert_eq!(resp.body["subtotal"], "138.50");
}
