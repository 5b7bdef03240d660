//! Status enums derived from catalog data.

use serde::{Deserialize, Serialize};

/// Stock threshold applied when a medicine does not specify one.
pub const DEFAULT_STOCK_THRESHOLD: u32 = 10;

/// Availability of a medicine, derived from its stock count and threshold.
///
/// - `0` units is always [`StockStatus::OutOfStock`]
/// - `1..=threshold` units is [`StockStatus::LowStock`]
/// - anything above the threshold is [`StockStatus::InStock`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockStatus {
    /// Classify a stock count against its low-stock threshold.
    #[must_use]
    pub const fn classify(stock_count: u32, threshold: u32) -> Self {
        if stock_count == 0 {
            Self::OutOfStock
        } else if stock_count <= threshold {
            Self::LowStock
        } else {
            Self::InStock
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfStock => write!(f, "out_of_stock"),
            Self::LowStock => write!(f, "low_stock"),
            Self::InStock => write!(f, "in_stock"),
        }
    }
}

impl std::str::FromStr for StockStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "out_of_stock" => Ok(Self::OutOfStock),
            "low_stock" => Ok(Self::LowStock),
            "in_stock" => Ok(Self::InStock),
            _ => Err(format!("invalid stock status: {s}")),
        }
    }
}
