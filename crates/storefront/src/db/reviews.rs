//! Review repository.
//!
//! Submitting a review also refreshes the medicine's cached
//! `average_rating` and `review_count` under the same write lock.

use chrono::Utc;
use tracing::{instrument, warn};

use healwell_core::{AverageRating, MedicineId, ReviewId};

use super::Database;
use crate::models::{NewReview, Review, ReviewSummary};

/// Repository for review operations.
pub struct ReviewRepository<'a> {
    db: &'a Database,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List reviews of a medicine in submission order.
    pub async fn list_for_medicine(&self, medicine_id: &MedicineId) -> Vec<Review> {
        self.db
            .tables()
            .read()
            .await
            .reviews_for(medicine_id)
            .cloned()
            .collect()
    }

    /// Store a review and recompute the medicine's rating aggregates.
    ///
    /// The aggregates are rebuilt from every stored review of the medicine,
    /// so seeded counts are replaced by the real count on the first new
    /// review. A review for an unknown medicine is still stored.
    #[instrument(skip(self, new), fields(medicine_id = %new.medicine_id, rating = %new.rating))]
    pub async fn create(&self, new: NewReview) -> Review {
        let mut tables = self.db.tables().write().await;

        let review = new.into_review(ReviewId::generate(), Utc::now());
        tables.reviews.push(review.clone());

        let (average, count) = {
            let ratings: Vec<_> = tables
                .reviews_for(&review.medicine_id)
                .map(|r| r.rating)
                .collect();
            (
                AverageRating::from_ratings(ratings.iter().copied()),
                u32::try_from(ratings.len()).unwrap_or(u32::MAX),
            )
        };

        match tables.medicine_mut(&review.medicine_id) {
            Some(medicine) => {
                medicine.average_rating = average;
                medicine.review_count = count;
            }
            None => warn!("Review stored for unknown medicine"),
        }

        review
    }

    /// Star distribution and average over a medicine's stored reviews.
    pub async fn summary(&self, medicine_id: &MedicineId) -> ReviewSummary {
        let reviews = self.list_for_medicine(medicine_id).await;
        ReviewSummary::from_reviews(medicine_id.clone(), &reviews)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use healwell_core::Rating;

    use super::*;
    use crate::db::CatalogRepository;

    fn new_review(medicine: &str, stars: i64) -> NewReview {
        NewReview {
            medicine_id: MedicineId::new(medicine),
            user_id: None,
            customer_name: "Sunita Rao".to_owned(),
            rating: Rating::new(stars).unwrap(),
            comment: "Does what it says.".to_owned(),
            is_verified: false,
        }
    }

    #[tokio::test]
    async fn test_first_review_replaces_seeded_aggregates() {
        let db = Database::seeded().unwrap();
        let reviews = ReviewRepository::new(&db);

        // med4 is seeded with 156 reviews but has none stored.
        reviews.create(new_review("med4", 3)).await;

        let medicine = CatalogRepository::new(&db)
            .get_medicine(&MedicineId::new("med4"))
            .await
            .unwrap();
        assert_eq!(medicine.medicine.review_count, 1);
        assert_eq!(medicine.medicine.average_rating.to_string(), "3.0");
    }

    #[tokio::test]
    async fn test_average_includes_seeded_reviews() {
        let db = Database::seeded().unwrap();
        let reviews = ReviewRepository::new(&db);
        let id = MedicineId::new("med1");

        // Stored: 5 and 4. Adding 3 gives mean 4.0.
        reviews.create(new_review("med1", 3)).await;

        let medicine = CatalogRepository::new(&db).get_medicine(&id).await.unwrap();
        assert_eq!(medicine.medicine.review_count, 3);
        assert_eq!(medicine.medicine.average_rating.to_string(), "4.0");
        assert_eq!(medicine.reviews.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_average_rounds_half_away_from_zero() {
        let db = Database::seeded().unwrap();
        let reviews = ReviewRepository::new(&db);
        let id = MedicineId::new("med2");

        for stars in [5, 4, 4, 4] {
            reviews.create(new_review("med2", stars)).await;
        }

        // 17 / 4 = 4.25
        let medicine = CatalogRepository::new(&db).get_medicine(&id).await.unwrap();
        assert_eq!(medicine.medicine.average_rating.to_string(), "4.3");
        assert_eq!(medicine.medicine.review_count, 4);
    }

    #[tokio::test]
    async fn test_list_keeps_submission_order() {
        let db = Database::seeded().unwrap();
        let reviews = ReviewRepository::new(&db);
        let id = MedicineId::new("med3");

        let created = reviews.create(new_review("med3", 2)).await;
        let listed = reviews.list_for_medicine(&id).await;

        let ids: Vec<_> = listed.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["rev3", created.id.as_str()]);
    }

    #[tokio::test]
    async fn test_review_for_unknown_medicine_is_stored() {
        let db = Database::seeded().unwrap();
        let reviews = ReviewRepository::new(&db);

        reviews.create(new_review("ghost", 5)).await;
        assert_eq!(
            reviews.list_for_medicine(&MedicineId::new("ghost")).await.len(),
            1
        );
    }

    #[tokio::test]
    async fn test_summary_distribution() {
        let db = Database::seeded().unwrap();
        let reviews = ReviewRepository::new(&db);
        let id = MedicineId::new("med1");

        let summary = reviews.summary(&id).await;
        assert_eq!(summary.total_reviews, 2);
        assert_eq!(summary.average_rating.to_string(), "4.5");
        assert_eq!(summary.rating_distribution.five_star, 1);
        assert_eq!(summary.rating_distribution.four_star, 1);

        let none = reviews.summary(&MedicineId::new("med4")).await;
        assert_eq!(none.total_reviews, 0);
    }
}
