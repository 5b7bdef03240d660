//! Review route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use healwell_core::MedicineId;

use crate::db::ReviewRepository;
use crate::models::{Review, ReviewSummary};
use crate::state::AppState;
use crate::validation::{CreateReviewRequest, ValidJson};

/// List a medicine's reviews, oldest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Path(id): Path<String>) -> Json<Vec<Review>> {
    Json(
        ReviewRepository::new(state.db())
            .list_for_medicine(&MedicineId::new(id))
            .await,
    )
}

/// Submit a review. Updates the medicine's average rating and review count.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(input): ValidJson<CreateReviewRequest>,
) -> (StatusCode, Json<Review>) {
    let review = ReviewRepository::new(state.db())
        .create(input.for_medicine(MedicineId::new(id)))
        .await;

    tracing::info!(review_id = %review.id, rating = %review.rating, "Review submitted");
    (StatusCode::CREATED, Json(review))
}

/// Star distribution and average for a medicine.
#[instrument(skip(state))]
pub async fn summary(State(state): State<AppState>, Path(id): Path<String>) -> Json<ReviewSummary> {
    Json(
        ReviewRepository::new(state.db())
            .summary(&MedicineId::new(id))
            .await,
    )
}
