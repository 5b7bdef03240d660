//! Customer reviews and rating summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use healwell_core::{AverageRating, MedicineId, Rating, ReviewId, UserId};

/// A submitted review. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub medicine_id: MedicineId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub customer_name: String,
    pub rating: Rating,
    pub comment: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new review.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub medicine_id: MedicineId,
    pub user_id: Option<UserId>,
    pub customer_name: String,
    pub rating: Rating,
    pub comment: String,
    pub is_verified: bool,
}

impl NewReview {
    /// Attach an id and creation time.
    #[must_use]
    pub fn into_review(self, id: ReviewId, created_at: DateTime<Utc>) -> Review {
        Review {
            id,
            medicine_id: self.medicine_id,
            user_id: self.user_id,
            customer_name: self.customer_name,
            rating: self.rating,
            comment: self.comment,
            is_verified: self.is_verified,
            created_at,
        }
    }
}

/// Count of reviews at each star level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingDistribution {
    pub five_star: u32,
    pub four_star: u32,
    pub three_star: u32,
    pub two_star: u32,
    pub one_star: u32,
}

impl RatingDistribution {
    /// Count one more review with `rating` stars.
    pub const fn record(&mut self, rating: Rating) {
        match rating.stars() {
            5 => self.five_star += 1,
            4 => self.four_star += 1,
            3 => self.three_star += 1,
            2 => self.two_star += 1,
            _ => self.one_star += 1,
        }
    }

    /// Share of reviews at a star level, as a percentage.
    #[must_use]
    pub fn percentage(&self, stars: u8) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let count = match stars {
            5 => self.five_star,
            4 => self.four_star,
            3 => self.three_star,
            2 => self.two_star,
            1 => self.one_star,
            _ => 0,
        };
        f64::from(count) / f64::from(total) * 100.0
    }

    /// Total number of reviews counted.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.five_star + self.four_star + self.three_star + self.two_star + self.one_star
    }
}

/// Aggregate view of a medicine's reviews.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub medicine_id: MedicineId,
    pub average_rating: AverageRating,
    pub total_reviews: u32,
    pub rating_distribution: RatingDistribution,
}

impl ReviewSummary {
    /// Summarize the given reviews of one medicine.
    #[must_use]
    pub fn from_reviews(medicine_id: MedicineId, reviews: &[Review]) -> Self {
        let mut distribution = RatingDistribution::default();
        for review in reviews {
            distribution.record(review.rating);
        }

        Self {
            medicine_id,
            average_rating: AverageRating::from_ratings(reviews.iter().map(|r| r.rating)),
            total_reviews: distribution.total(),
            rating_distribution: distribution,
        }
    }
}
