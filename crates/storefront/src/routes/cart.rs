//! Cart route handlers.
//!
//! Every handler is scoped by the `x-session-id` header through the
//! `CartSession` extractor.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use healwell_core::MedicineId;

use super::MessageResponse;
use crate::db::CartRepository;
use crate::error::{AppError, Result};
use crate::middleware::CartSession;
use crate::models::{CartItem, CartItemWithMedicine, CartSummary, CartUpdate};
use crate::state::AppState;
use crate::validation::{AddToCartRequest, UpdateQuantityRequest, ValidJson};

/// List the session's cart lines with their medicines.
#[instrument(skip(state), fields(session = %session.0))]
pub async fn show(
    State(state): State<AppState>,
    session: CartSession,
) -> Json<Vec<CartItemWithMedicine>> {
    Json(CartRepository::new(state.db()).list_items(&session.0).await)
}

/// Add a medicine to the cart, merging with an existing line.
#[instrument(skip(state, addition), fields(session = %session.0))]
pub async fn add(
    State(state): State<AppState>,
    session: CartSession,
    ValidJson(addition): ValidJson<AddToCartRequest>,
) -> (StatusCode, Json<CartItem>) {
    let item = CartRepository::new(state.db())
        .add_item(&session.0, &addition.medicine_id, addition.quantity)
        .await;

    (StatusCode::CREATED, Json(item))
}

/// Set a line's quantity. Zero removes the line.
#[instrument(skip(state, quantity), fields(session = %session.0))]
pub async fn update(
    State(state): State<AppState>,
    session: CartSession,
    Path(medicine_id): Path<String>,
    ValidJson(quantity): ValidJson<UpdateQuantityRequest>,
) -> Result<Response> {
    let outcome = CartRepository::new(state.db())
        .update_quantity(&session.0, &MedicineId::new(medicine_id), quantity)
        .await;

    match outcome {
        CartUpdate::Updated(item) => Ok(Json(item).into_response()),
        CartUpdate::Removed => {
            Ok(Json(MessageResponse::new("Item removed from cart")).into_response())
        }
        CartUpdate::NotFound => Err(AppError::NotFound("Cart item not found".to_string())),
    }
}

/// Remove a line from the cart.
#[instrument(skip(state), fields(session = %session.0))]
pub async fn remove(
    State(state): State<AppState>,
    session: CartSession,
    Path(medicine_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let removed = CartRepository::new(state.db())
        .remove_item(&session.0, &MedicineId::new(medicine_id))
        .await;

    if removed {
        Ok(Json(MessageResponse::new("Item removed from cart")))
    } else {
        Err(AppError::NotFound("Cart item not found".to_string()))
    }
}

/// Empty the session's cart.
#[instrument(skip(state), fields(session = %session.0))]
pub async fn clear(State(state): State<AppState>, session: CartSession) -> Json<MessageResponse> {
    let removed = CartRepository::new(state.db()).clear(&session.0).await;
    tracing::debug!(removed, "Cart cleared");
    Json(MessageResponse::new("Cart cleared"))
}

/// Item count, line count and subtotal.
#[instrument(skip(state), fields(session = %session.0))]
pub async fn summary(State(state): State<AppState>, session: CartSession) -> Json<CartSummary> {
    Json(CartRepository::new(state.db()).summary(&session.0).await)
}
