//! Request body validation for the JSON API.
//!
//! Request types keep their fields loosely typed (`serde_json::Value`) so a
//! wrong type is reported as a field error next to every other problem in the
//! body, instead of failing deserialization on the first one.

use std::num::NonZeroU32;

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use healwell_core::{MedicineId, Rating, UserId};

use crate::error::{AppError, FieldError};
use crate::models::NewReview;

/// A request body that can be checked into a validated value.
pub trait Validate: DeserializeOwned {
    /// The checked form handed to the handler.
    type Valid;

    /// Top-level message for a 400 response.
    const INVALID_MESSAGE: &'static str;

    /// Check every field, returning all problems found.
    ///
    /// # Errors
    ///
    /// Returns one `FieldError` per invalid field.
    fn validate(self) -> Result<Self::Valid, Vec<FieldError>>;
}

/// JSON body extractor that runs [`Validate`] before the handler.
///
/// Malformed JSON and failed validation both become a 400 with the type's
/// `INVALID_MESSAGE`.
pub struct ValidJson<R: Validate>(pub R::Valid);

impl<S, R> FromRequest<S> for ValidJson<R>
where
    S: Send + Sync,
    R: Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<R>::from_request(req, state)
            .await
            .map_err(|rejection| invalid_body::<R>(&rejection))?;

        body.validate()
            .map(Self)
            .map_err(|errors| AppError::Validation {
                message: R::INVALID_MESSAGE.to_string(),
                errors,
            })
    }
}

fn invalid_body<R: Validate>(rejection: &JsonRejection) -> AppError {
    AppError::Validation {
        message: R::INVALID_MESSAGE.to_string(),
        errors: vec![FieldError::new("body", rejection.body_text())],
    }
}

// =============================================================================
// Field Helpers
// =============================================================================

/// A string that is non-empty after trimming. Returns the trimmed value.
fn required_text(field: &str, value: Option<&Value>, errors: &mut Vec<FieldError>) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::String(_)) => {
            errors.push(FieldError::new(field, "must not be empty"));
            String::new()
        }
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, "is required"));
            String::new()
        }
        Some(_) => {
            errors.push(FieldError::new(field, "must be a string"));
            String::new()
        }
    }
}

/// A JSON number with no fractional part.
///
/// `3` and `3.0` both count as integers; `3.5` and `"3"` do not.
#[allow(
    clippy::float_cmp,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
pub(crate) fn as_integer(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(n) = number.as_i64() {
        return Some(n);
    }
    let f = number.as_f64()?;
    (f.fract() == 0.0 && f.abs() < i64::MAX as f64).then(|| f as i64)
}

// =============================================================================
// Request Types
// =============================================================================

/// Body of `POST /api/medicines/{id}/reviews`.
///
/// The medicine comes from the path. `isVerified` is not accepted from
/// clients; API submissions are always unverified.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub customer_name: Option<Value>,
    pub rating: Option<Value>,
    pub comment: Option<Value>,
    pub user_id: Option<Value>,
}

/// A review body that passed validation, still missing its medicine.
#[derive(Debug, Clone)]
pub struct ReviewInput {
    pub user_id: Option<UserId>,
    pub customer_name: String,
    pub rating: Rating,
    pub comment: String,
}

impl ReviewInput {
    /// Attach the medicine from the request path.
    #[must_use]
    pub fn for_medicine(self, medicine_id: MedicineId) -> NewReview {
        NewReview {
            medicine_id,
            user_id: self.user_id,
            customer_name: self.customer_name,
            rating: self.rating,
            comment: self.comment,
            is_verified: false,
        }
    }
}

impl Validate for CreateReviewRequest {
    type Valid = ReviewInput;

    const INVALID_MESSAGE: &'static str = "Invalid review data";

    fn validate(self) -> Result<ReviewInput, Vec<FieldError>> {
        let mut errors = Vec::new();

        let customer_name = required_text("customerName", self.customer_name.as_ref(), &mut errors);
        let comment = required_text("comment", self.comment.as_ref(), &mut errors);

        let rating = match self.rating.as_ref() {
            None | Some(Value::Null) => {
                errors.push(FieldError::new("rating", "is required"));
                None
            }
            Some(value) => match as_integer(value).map(Rating::new) {
                Some(Ok(rating)) => Some(rating),
                Some(Err(e)) => {
                    errors.push(FieldError::new("rating", e.to_string()));
                    None
                }
                None => {
                    errors.push(FieldError::new("rating", "must be an integer"));
                    None
                }
            },
        };

        let user_id = match self.user_id {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if !s.trim().is_empty() => Some(UserId::new(s.trim())),
            Some(_) => {
                errors.push(FieldError::new("userId", "must be a non-empty string"));
                None
            }
        };

        match rating {
            Some(rating) if errors.is_empty() => Ok(ReviewInput {
                user_id,
                customer_name,
                rating,
                comment,
            }),
            _ => Err(errors),
        }
    }
}

/// Body of `POST /api/cart`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub medicine_id: Option<Value>,
    pub quantity: Option<Value>,
}

/// A validated add-to-cart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartAddition {
    pub medicine_id: MedicineId,
    pub quantity: NonZeroU32,
}

impl Validate for AddToCartRequest {
    type Valid = CartAddition;

    const INVALID_MESSAGE: &'static str = "Invalid cart item data";

    fn validate(self) -> Result<CartAddition, Vec<FieldError>> {
        let mut errors = Vec::new();

        let medicine_id = required_text("medicineId", self.medicine_id.as_ref(), &mut errors);

        let quantity = match self.quantity.as_ref() {
            None | Some(Value::Null) => {
                errors.push(FieldError::new("quantity", "is required"));
                None
            }
            Some(value) => {
                let parsed = as_integer(value)
                    .and_then(|n| u32::try_from(n).ok())
                    .and_then(NonZeroU32::new);
                if parsed.is_none() {
                    errors.push(FieldError::new("quantity", "must be a positive integer"));
                }
                parsed
            }
        };

        match quantity {
            Some(quantity) if errors.is_empty() => Ok(CartAddition {
                medicine_id: MedicineId::new(medicine_id),
                quantity,
            }),
            _ => Err(errors),
        }
    }
}

/// Body of `PUT /api/cart/{medicineId}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: Option<Value>,
}

impl Validate for UpdateQuantityRequest {
    type Valid = u32;

    const INVALID_MESSAGE: &'static str = "Invalid quantity";

    fn validate(self) -> Result<u32, Vec<FieldError>> {
        self.quantity
            .as_ref()
            .and_then(as_integer)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| {
                vec![FieldError::new(
                    "quantity",
                    "must be a non-negative integer",
                )]
            })
    }
}
