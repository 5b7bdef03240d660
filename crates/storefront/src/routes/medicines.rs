//! Medicine route handlers.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use tracing::instrument;

use healwell_core::{CategoryId, MedicineId};

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::models::{MedicineFilter, MedicineWithCategory};
use crate::state::AppState;

/// Query parameters for the medicine listing.
///
/// `limit` is kept as text and read leniently: a value that does not start
/// with an integer means no limit.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineQuery {
    pub category_id: Option<String>,
    pub search: Option<String>,
    pub limit: Option<String>,
}

impl MedicineQuery {
    /// Convert into a store filter.
    #[must_use]
    pub fn into_filter(self) -> MedicineFilter {
        MedicineFilter {
            category_id: self.category_id.map(CategoryId::new),
            search: self.search,
            limit: self.limit.as_deref().and_then(leading_limit),
        }
    }
}

/// Read the integer at the start of `raw`, ignoring anything after it.
///
/// `"3"` and `"2.5"` give 3 and 2. Zero, negative or non-numeric input gives
/// `None`.
fn leading_limit(raw: &str) -> Option<usize> {
    let raw = raw.trim_start();
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, raw.get(1..)?),
        Some(b'+') => (false, raw.get(1..)?),
        _ => (false, raw),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = digits.get(..end).filter(|d| !d.is_empty())?;
    if negative {
        return None;
    }

    // Out-of-range values are as good as unlimited
    let limit = digits.parse::<usize>().unwrap_or(usize::MAX);
    (limit > 0).then_some(limit)
}

/// List active medicines with optional category, search and limit filters.
#[instrument(skip(state, query))]
pub async fn index(
    State(state): State<AppState>,
    query: std::result::Result<Query<MedicineQuery>, QueryRejection>,
) -> Result<Json<Vec<MedicineWithCategory>>> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let filter = query.into_filter();

    let medicines = CatalogRepository::new(state.db())
        .list_medicines(&filter)
        .await?;
    Ok(Json(medicines))
}

/// Get one medicine with its category and reviews.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MedicineWithCategory>> {
    CatalogRepository::new(state.db())
        .get_medicine(&MedicineId::new(id))
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Medicine not found".to_string()))
}
