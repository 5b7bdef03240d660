//! Medicines and their catalog views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use healwell_core::{
    AverageRating, CategoryId, DEFAULT_STOCK_THRESHOLD, MedicineId, Price, StockStatus,
    discount_percent,
};

use super::{Category, Review};

const fn default_stock_threshold() -> u32 {
    DEFAULT_STOCK_THRESHOLD
}

const fn default_active() -> bool {
    true
}

/// A medicine listed in the catalog.
///
/// `average_rating` and `review_count` are caches maintained by the review
/// repository; they are never accepted from API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: MedicineId,
    pub name: String,
    pub description: String,
    pub category_id: CategoryId,
    pub price: Price,
    /// Pre-discount price, shown struck through.
    #[serde(default)]
    pub original_price: Option<Price>,
    pub stock_count: u32,
    #[serde(default = "default_stock_threshold")]
    pub stock_threshold: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub composition: Option<String>,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub pack_size: Option<String>,
    #[serde(default)]
    pub requires_prescription: bool,
    #[serde(default)]
    pub average_rating: AverageRating,
    #[serde(default)]
    pub review_count: u32,
    /// Soft-delete marker. Inactive medicines are hidden from list/search
    /// but still resolve by id.
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Medicine {
    /// Availability derived from stock count and threshold.
    #[must_use]
    pub const fn stock_status(&self) -> StockStatus {
        StockStatus::classify(self.stock_count, self.stock_threshold)
    }

    /// Whole percent off the original price, if discounted.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        discount_percent(self.price, self.original_price)
    }

    /// Case-insensitive substring match against name, description and
    /// composition. `needle` must already be lowercase.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .composition
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(needle))
    }
}

/// Input for creating a medicine. Derived fields are not accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicine {
    pub name: String,
    pub description: String,
    pub category_id: CategoryId,
    pub price: Price,
    #[serde(default)]
    pub original_price: Option<Price>,
    pub stock_count: u32,
    #[serde(default = "default_stock_threshold")]
    pub stock_threshold: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub composition: Option<String>,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub pack_size: Option<String>,
    #[serde(default)]
    pub requires_prescription: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl NewMedicine {
    /// Attach an id and creation time, starting with no reviews.
    #[must_use]
    pub fn into_medicine(self, id: MedicineId, created_at: DateTime<Utc>) -> Medicine {
        Medicine {
            id,
            name: self.name,
            description: self.description,
            category_id: self.category_id,
            price: self.price,
            original_price: self.original_price,
            stock_count: self.stock_count,
            stock_threshold: self.stock_threshold,
            image_url: self.image_url,
            manufacturer: self.manufacturer,
            composition: self.composition,
            dosage: self.dosage,
            pack_size: self.pack_size,
            requires_prescription: self.requires_prescription,
            average_rating: AverageRating::ZERO,
            review_count: 0,
            is_active: self.is_active,
            created_at,
        }
    }
}

/// Filters for listing medicines. Empty strings behave like `None`.
#[derive(Debug, Clone, Default)]
pub struct MedicineFilter {
    pub category_id: Option<CategoryId>,
    pub search: Option<String>,
    /// Keep only the first N matches. Zero means no limit.
    pub limit: Option<usize>,
}

/// A medicine joined with its category (and reviews on the detail view).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineWithCategory {
    #[serde(flatten)]
    pub medicine: Medicine,
    pub stock_status: StockStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u32>,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
}

impl MedicineWithCategory {
    /// Join a medicine with its category, computing derived display fields.
    #[must_use]
    pub fn new(medicine: Medicine, category: Category) -> Self {
        Self {
            stock_status: medicine.stock_status(),
            discount_percent: medicine.discount_percent(),
            medicine,
            category,
            reviews: None,
        }
    }

    /// Attach the medicine's reviews.
    #[must_use]
    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.reviews = Some(reviews);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn paracetamol() -> Medicine {
        NewMedicine {
            name: "Paracetamol 500mg".to_owned(),
            description: "Strip of 10 tablets".to_owned(),
            category_id: CategoryId::new("cat1"),
            price: Price::parse("24.50").unwrap(),
            original_price: Some(Price::parse("35.00").unwrap()),
            stock_count: 45,
            stock_threshold: 10,
            image_url: None,
            manufacturer: Some("ABC Pharma".to_owned()),
            composition: Some("Paracetamol 500mg".to_owned()),
            dosage: None,
            pack_size: None,
            requires_prescription: false,
            is_active: true,
        }
        .into_medicine(MedicineId::new("med1"), Utc::now())
    }

    #[test]
    fn test_new_medicine_starts_without_reviews() {
        let med = paracetamol();
        assert_eq!(med.average_rating.to_string(), "0.0");
        assert_eq!(med.review_count, 0);
    }

    #[test]
    fn test_search_matches_any_field_case_insensitively() {
        let mut med = paracetamol();
        assert!(med.matches_search("paracetamol"));
        assert!(med.matches_search("strip"));
        assert!(!med.matches_search("vitamin"));

        med.composition = Some("Vitamin D3".to_owned());
        assert!(med.matches_search("vitamin"));

        med.composition = None;
        assert!(!med.matches_search("vitamin"));
    }

    #[test]
    fn test_view_serializes_flat_camel_case() {
        let med = paracetamol();
        let category = Category {
            id: CategoryId::new("cat1"),
            name: "Pain Relief".to_owned(),
            slug: "pain-relief".to_owned(),
            icon: "fas fa-tablets".to_owned(),
            description: None,
            item_count: 245,
        };

        let json = serde_json::to_value(MedicineWithCategory::new(med, category)).unwrap();
        assert_eq!(json["id"], "med1");
        assert_eq!(json["categoryId"], "cat1");
        assert_eq!(json["price"], "24.50");
        assert_eq!(json["averageRating"], "0.0");
        assert_eq!(json["stockStatus"], "in_stock");
        assert_eq!(json["discountPercent"], 30);
        assert_eq!(json["category"]["slug"], "pain-relief");
        assert!(json.get("reviews").is_none());
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let med: Medicine = serde_json::from_value(serde_json::json!({
            "id": "med9",
            "name": "Cetirizine",
            "description": "Antihistamine",
            "categoryId": "cat1",
            "price": "12.00",
            "stockCount": 3
        }))
        .unwrap();

        assert_eq!(med.stock_threshold, DEFAULT_STOCK_THRESHOLD);
        assert!(med.is_active);
        assert_eq!(med.stock_status(), StockStatus::LowStock);
        assert_eq!(med.discount_percent(), None);
    }
}
