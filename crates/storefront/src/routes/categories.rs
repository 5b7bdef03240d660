//! Category route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::models::Category;
use crate::state::AppState;

/// List all categories.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(CatalogRepository::new(state.db()).list_categories().await)
}

/// Get one category by slug.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Category>> {
    CatalogRepository::new(state.db())
        .get_category_by_slug(&slug)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
}
