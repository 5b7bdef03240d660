//! Review ratings and the running average derived from them.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places carried by an average rating.
const AVERAGE_SCALE: u32 = 1;

/// Errors that can occur when building a [`Rating`] or [`AverageRating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The star count is outside 1-5.
    #[error("rating must be between {min} and {max}, got {value}", min = Rating::MIN, max = Rating::MAX)]
    OutOfRange {
        /// The rejected value.
        value: i64,
    },
    /// The average is not a decimal between 0.0 and 5.0.
    #[error("invalid average rating: {0}")]
    InvalidAverage(String),
}

/// A single review's star rating, 1 to 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest allowed rating.
    pub const MIN: u8 = 1;
    /// Highest allowed rating.
    pub const MAX: u8 = 5;

    /// Create a rating.
    ///
    /// # Errors
    ///
    /// Returns `RatingError::OutOfRange` unless `value` is within 1-5.
    pub fn new(value: i64) -> Result<Self, RatingError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(RatingError::OutOfRange { value })
    }

    /// Number of stars.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mean of a medicine's review ratings, always rendered with one decimal
/// place (`"0.0"` when there are no reviews).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct AverageRating(Decimal);

impl AverageRating {
    /// The average of no reviews.
    pub const ZERO: Self = Self(Decimal::from_parts(0, 0, 0, false, AVERAGE_SCALE));

    /// Compute the arithmetic mean of `ratings`, rounded half away from zero
    /// to one decimal place.
    #[must_use]
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = Rating>,
    {
        let (sum, count) = ratings
            .into_iter()
            .fold((0u64, 0u64), |(sum, count), r| {
                (sum + u64::from(r.stars()), count + 1)
            });

        if count == 0 {
            return Self::ZERO;
        }

        let mean = Decimal::from(sum) / Decimal::from(count);
        let mut rounded =
            mean.round_dp_with_strategy(AVERAGE_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(AVERAGE_SCALE);
        Self(rounded)
    }

    /// Build an average from a stored decimal (e.g. seed data).
    ///
    /// # Errors
    ///
    /// Returns `RatingError::InvalidAverage` if the value is outside 0.0-5.0.
    pub fn new(value: Decimal) -> Result<Self, RatingError> {
        if value < Decimal::ZERO || value > Decimal::from(Rating::MAX) {
            return Err(RatingError::InvalidAverage(value.to_string()));
        }
        let mut value =
            value.round_dp_with_strategy(AVERAGE_SCALE, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(AVERAGE_SCALE);
        Ok(Self(value))
    }

    /// Parse an average from its string form (`"4.5"`).
    ///
    /// # Errors
    ///
    /// Returns `RatingError::InvalidAverage` if the input is not a decimal
    /// within 0.0-5.0.
    pub fn parse(s: &str) -> Result<Self, RatingError> {
        let value: Decimal = s
            .trim()
            .parse()
            .map_err(|_| RatingError::InvalidAverage(s.to_owned()))?;
        Self::new(value)
    }

    /// The underlying decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl Default for AverageRating {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<Decimal> for AverageRating {
    type Error = RatingError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AverageRating> for Decimal {
    fn from(avg: AverageRating) -> Self {
        avg.0
    }
}

impl std::fmt::Display for AverageRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
