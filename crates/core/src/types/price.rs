//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are always held with exactly two decimal places and serialize as
//! strings (`"24.50"`), so JSON clients never see float rounding artifacts.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places every price carries.
const PRICE_SCALE: u32 = 2;

/// Errors that can occur when building a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The amount has more than two decimal places.
    #[error("price must have at most {PRICE_SCALE} decimal places")]
    TooPrecise,
    /// The input is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
}

/// A non-negative amount in the store currency, with two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A zero price (`0.00`).
    pub const ZERO: Self = Self(Decimal::from_parts(0, 0, 0, false, PRICE_SCALE));

    /// Create a price from an amount in minor units (e.g. paise, cents).
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `minor_units` is below zero.
    pub fn from_minor_units(minor_units: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(minor_units, PRICE_SCALE))
    }

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative or has more than two
    /// decimal places.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        if amount.normalize().scale() > PRICE_SCALE {
            return Err(PriceError::TooPrecise);
        }
        let mut amount = amount.normalize();
        amount.rescale(PRICE_SCALE);
        Ok(Self(amount))
    }

    /// Parse a price from its string form (`"24.50"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid non-negative amount.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount: Decimal = s
            .trim()
            .parse()
            .map_err(|_| PriceError::Invalid(s.to_owned()))?;
        Self::new(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Price of `quantity` units, rounded to two decimal places.
#[must_use]
pub fn line_total(unit_price: Price, quantity: u32) -> Decimal {
    let mut total = (unit_price.amount() * Decimal::from(quantity))
        .round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    total.rescale(PRICE_SCALE);
    total
}

/// Whole percent saved relative to `original`, rounded down.
///
/// Returns `None` when there is no original price or it is not higher than
/// the current price.
#[must_use]
pub fn discount_percent(price: Price, original: Option<Price>) -> Option<u32> {
    let original = original?;
    if original.amount() <= price.amount() {
        return None;
    }

    let saved = (original.amount() - price.amount()) * Decimal::ONE_HUNDRED / original.amount();
    saved
        .round_dp_with_strategy(0, RoundingStrategy::ToZero)
        .to_u32()
}
