//! Integration tests for reviews and rating aggregates.
//!
//! Run with: cargo test -p healwell-integration-tests

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::json;

use healwell_integration_tests::TestContext;

#[tokio::test]
async fn test_list_reviews() {
    let ctx = TestContext::new();

    let resp = ctx.get("/api/medicines/med3/reviews").await;
    assert_eq!(resp.status, StatusCode::OK);
    let reviews = resp.body.as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["customerName"], "Amit Patel");

    let none = ctx.get("/api/medicines/med4/reviews").await;
    assert!(none.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_submit_review_updates_medicine() {
    let ctx = TestContext::new();

    let resp = ctx
        .post(
            "/api/medicines/med1/reviews",
            json!({ "customerName": "Neha Gupta", "rating": 3, "comment": "Okay." }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["medicineId"], "med1");
    assert_eq!(resp.body["rating"], 3);
    assert_eq!(resp.body["isVerified"], false);

    // Stored ratings 5, 4, 3
    let medicine = ctx.get("/api/medicines/med1").await;
    assert_eq!(medicine.body["averageRating"], "4.0");
    assert_eq!(medicine.body["reviewCount"], 3);
    assert_eq!(medicine.body["reviews"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_invalid_review_lists_field_errors() {
    let ctx = TestContext::new();

    let resp = ctx
        .post(
            "/api/medicines/med1/reviews",
            json!({ "customerName": "  ", "rating": 9, "comment": "Fine" }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["message"], "Invalid review data");
    let fields: Vec<_> = resp.body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["customerName", "rating"]);

    // Nothing was stored
    let medicine = ctx.get("/api/medicines/med1").await;
    assert_eq!(medicine.body["reviewCount"], 234);
}

#[tokio::test]
async fn test_review_summary() {
    let ctx = TestContext::new();
    ctx.post(
        "/api/medicines/med3/reviews",
        json!({ "customerName": "Kiran", "rating": 4, "comment": "Good" }),
    )
    .await;

    let resp = ctx.get("/api/medicines/med3/reviews/summary").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["medicineId"], "med3");
    assert_eq!(resp.body["totalReviews"], 2);
    assert_eq!(resp.body["averageRating"], "4.5");
    assert_eq!(resp.body["ratingDistribution"]["fiveStar"], 1);
    assert_eq!(resp.body["ratingDistribution"]["fourStar"], 1);
    assert_eq!(resp.body["ratingDistribution"]["oneStar"], 0);
}
