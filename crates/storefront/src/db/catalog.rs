//! Catalog repository: categories and medicines.

use chrono::Utc;
use tracing::{instrument, warn};

use healwell_core::{CategoryId, MedicineId};

use super::{Database, RepositoryError};
use crate::models::{
    Category, Medicine, MedicineFilter, MedicineWithCategory, NewCategory, NewMedicine,
};

/// Repository for catalog reads and writes.
pub struct CatalogRepository<'a> {
    db: &'a Database,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List all categories in insertion order.
    pub async fn list_categories(&self) -> Vec<Category> {
        self.db.tables().read().await.categories.clone()
    }

    /// Get a category by its slug (exact, case-sensitive match).
    pub async fn get_category_by_slug(&self, slug: &str) -> Option<Category> {
        self.db
            .tables()
            .read()
            .await
            .categories
            .iter()
            .find(|c| c.slug == slug)
            .cloned()
    }

    /// Create a category with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is already taken.
    #[instrument(skip(self, new), fields(slug = %new.slug))]
    pub async fn create_category(&self, new: NewCategory) -> Result<Category, RepositoryError> {
        let mut tables = self.db.tables().write().await;

        if tables.categories.iter().any(|c| c.slug == new.slug) {
            return Err(RepositoryError::Conflict(format!(
                "category slug '{}' already exists",
                new.slug
            )));
        }

        let category = new.into_category(CategoryId::generate());
        tables.categories.push(category.clone());
        Ok(category)
    }

    /// List active medicines, joined with their categories.
    ///
    /// Filters apply in order: active flag, exact category, case-insensitive
    /// search over name/description/composition, then `limit`. Results keep
    /// insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if a matching medicine
    /// references a category that does not exist.
    #[instrument(skip(self))]
    pub async fn list_medicines(
        &self,
        filter: &MedicineFilter,
    ) -> Result<Vec<MedicineWithCategory>, RepositoryError> {
        let tables = self.db.tables().read().await;

        let category_id = filter
            .category_id
            .as_ref()
            .filter(|id| !id.as_str().is_empty());
        let needle = filter
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let limit = filter.limit.filter(|&n| n > 0).unwrap_or(usize::MAX);

        tables
            .medicines
            .iter()
            .filter(|m| m.is_active)
            .filter(|m| category_id.is_none_or(|id| &m.category_id == id))
            .filter(|m| needle.as_deref().is_none_or(|n| m.matches_search(n)))
            .take(limit)
            .map(|m| {
                let category = tables.category(&m.category_id).ok_or_else(|| {
                    RepositoryError::DataCorruption(format!(
                        "medicine '{}' references missing category '{}'",
                        m.id, m.category_id
                    ))
                })?;
                Ok(MedicineWithCategory::new(m.clone(), category.clone()))
            })
            .collect()
    }

    /// Get one medicine with its category and reviews.
    ///
    /// Inactive medicines still resolve here; only listings hide them.
    /// Returns `None` if the medicine or its category is missing.
    #[instrument(skip(self))]
    pub async fn get_medicine(&self, id: &MedicineId) -> Option<MedicineWithCategory> {
        let tables = self.db.tables().read().await;

        let medicine = tables.medicine(id)?;
        let Some(category) = tables.category(&medicine.category_id) else {
            warn!(
                medicine_id = %id,
                category_id = %medicine.category_id,
                "Medicine references missing category"
            );
            return None;
        };

        let reviews = tables.reviews_for(id).cloned().collect();
        Some(MedicineWithCategory::new(medicine.clone(), category.clone()).with_reviews(reviews))
    }

    /// Create a medicine with a fresh id and empty rating aggregates.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the category does not
    /// exist.
    #[instrument(skip(self, new), fields(name = %new.name))]
    pub async fn create_medicine(&self, new: NewMedicine) -> Result<Medicine, RepositoryError> {
        let mut tables = self.db.tables().write().await;

        if tables.category(&new.category_id).is_none() {
            return Err(RepositoryError::InvalidReference(format!(
                "category '{}' does not exist",
                new.category_id
            )));
        }

        let medicine = new.into_medicine(MedicineId::generate(), Utc::now());
        tables.medicines.push(medicine.clone());
        Ok(medicine)
    }

    /// Replace a medicine's stock count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the medicine does not exist.
    #[instrument(skip(self))]
    pub async fn update_stock(
        &self,
        id: &MedicineId,
        stock_count: u32,
    ) -> Result<Medicine, RepositoryError> {
        let mut tables = self.db.tables().write().await;
        let medicine = tables.medicine_mut(id).ok_or(RepositoryError::NotFound)?;
        medicine.stock_count = stock_count;
        Ok(medicine.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use healwell_core::{Price, StockStatus};

    use super::*;

    fn new_medicine(category: &str) -> NewMedicine {
        NewMedicine {
            name: "Metformin 500mg".to_owned(),
            description: "Strip of 15 tablets".to_owned(),
            category_id: CategoryId::new(category),
            price: Price::parse("45.00").unwrap(),
            original_price: None,
            stock_count: 20,
            stock_threshold: 5,
            image_url: None,
            manufacturer: Some("Sugar Free Labs".to_owned()),
            composition: Some("Metformin Hydrochloride".to_owned()),
            dosage: Some("1 tablet twice daily".to_owned()),
            pack_size: Some("15 tablets".to_owned()),
            requires_prescription: true,
            is_active: true,
        }
    }

    fn ids(list: &[MedicineWithCategory]) -> Vec<&str> {
        list.iter().map(|m| m.medicine.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_categories_in_seed_order() {
        let db = Database::seeded().unwrap();
        let categories = CatalogRepository::new(&db).list_categories().await;
        let slugs: Vec<_> = categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(
            slugs,
            [
                "pain-relief",
                "antibiotics",
                "vitamins",
                "diabetes",
                "heart-care",
                "skin-care"
            ]
        );
    }

    #[tokio::test]
    async fn test_category_slug_is_case_sensitive() {
        let db = Database::seeded().unwrap();
        let repo = CatalogRepository::new(&db);

        let found = repo.get_category_by_slug("vitamins").await.unwrap();
        assert_eq!(found.id.as_str(), "cat3");
        assert!(repo.get_category_by_slug("Vitamins").await.is_none());
        assert!(repo.get_category_by_slug("vitamin").await.is_none());
    }

    #[tokio::test]
    async fn test_list_all_active_in_insertion_order() {
        let db = Database::seeded().unwrap();
        let list = CatalogRepository::new(&db)
            .list_medicines(&MedicineFilter::default())
            .await
            .unwrap();
        assert_eq!(ids(&list), ["med1", "med2", "med3", "med4"]);
        assert_eq!(list.first().unwrap().category.slug, "pain-relief");
    }

    #[tokio::test]
    async fn test_filter_by_category_returns_only_active_matches() {
        let db = Database::seeded().unwrap();
        let repo = CatalogRepository::new(&db);

        let mut hidden = new_medicine("cat2");
        hidden.is_active = false;
        repo.create_medicine(hidden).await.unwrap();

        let list = repo
            .list_medicines(&MedicineFilter {
                category_id: Some(CategoryId::new("cat2")),
                ..MedicineFilter::default()
            })
            .await
            .unwrap();

        assert_eq!(ids(&list), ["med2"]);
        assert!(list
            .iter()
            .all(|m| m.medicine.category_id.as_str() == "cat2" && m.medicine.is_active));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_across_fields() {
        let db = Database::seeded().unwrap();
        let repo = CatalogRepository::new(&db);

        let by_name = repo
            .list_medicines(&MedicineFilter {
                search: Some("vitamin".to_owned()),
                ..MedicineFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(ids(&by_name), ["med3"]);

        let by_description = repo
            .list_medicines(&MedicineFilter {
                search: Some("STRIP OF 10".to_owned()),
                ..MedicineFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(ids(&by_description), ["med1", "med4"]);

        repo.create_medicine(new_medicine("cat4")).await.unwrap();
        let by_composition = repo
            .list_medicines(&MedicineFilter {
                search: Some("hydrochloride".to_owned()),
                ..MedicineFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(by_composition.len(), 1);
        assert_eq!(by_composition.first().unwrap().medicine.name, "Metformin 500mg");
    }

    #[tokio::test]
    async fn test_limit_truncates_and_zero_means_unlimited() {
        let db = Database::seeded().unwrap();
        let repo = CatalogRepository::new(&db);

        let two = repo
            .list_medicines(&MedicineFilter {
                limit: Some(2),
                ..MedicineFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(ids(&two), ["med1", "med2"]);

        let all = repo
            .list_medicines(&MedicineFilter {
                limit: Some(0),
                ..MedicineFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn test_empty_filters_are_ignored() {
        let db = Database::seeded().unwrap();
        let list = CatalogRepository::new(&db)
            .list_medicines(&MedicineFilter {
                category_id: Some(CategoryId::new("")),
                search: Some(String::new()),
                limit: None,
            })
            .await
            .unwrap();
        assert_eq!(list.len(), 4);
    }

    #[tokio::test]
    async fn test_whitespace_search_is_a_real_term() {
        let db = Database::seeded().unwrap();
        let list = CatalogRepository::new(&db)
            .list_medicines(&MedicineFilter {
                search: Some("   ".to_owned()),
                ..MedicineFilter::default()
            })
            .await
            .unwrap();
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_missing_category_breaks_list_but_hides_detail() {
        let db = Database::seeded().unwrap();
        {
            let mut tables = db.tables().write().await;
            let mut orphan = tables.medicine(&MedicineId::new("med1")).unwrap().clone();
            orphan.id = MedicineId::new("med-orphan");
            orphan.category_id = CategoryId::new("cat-gone");
            tables.medicines.push(orphan);
        }
        let repo = CatalogRepository::new(&db);

        let result = repo.list_medicines(&MedicineFilter::default()).await;
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));

        // Filters that skip the orphan still succeed
        let cat1 = repo
            .list_medicines(&MedicineFilter {
                category_id: Some(CategoryId::new("cat1")),
                ..MedicineFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(ids(&cat1), ["med1"]);

        assert!(repo.get_medicine(&MedicineId::new("med-orphan")).await.is_none());
        assert!(repo.get_medicine(&MedicineId::new("med1")).await.is_some());
    }

    #[tokio::test]
    async fn test_get_medicine_joins_category_and_reviews() {
        let db = Database::seeded().unwrap();
        let medicine = CatalogRepository::new(&db)
            .get_medicine(&MedicineId::new("med1"))
            .await
            .unwrap();

        assert_eq!(medicine.category.name, "Pain Relief");
        let reviews = medicine.reviews.unwrap();
        let authors: Vec<_> = reviews.iter().map(|r| r.customer_name.as_str()).collect();
        assert_eq!(authors, ["Rajesh Kumar", "Priya Sharma"]);
    }

    #[tokio::test]
    async fn test_get_medicine_ignores_active_flag() {
        let db = Database::seeded().unwrap();
        let repo = CatalogRepository::new(&db);

        let mut discontinued = new_medicine("cat4");
        discontinued.is_active = false;
        let created = repo.create_medicine(discontinued).await.unwrap();

        assert!(repo.get_medicine(&created.id).await.is_some());
        assert!(repo.get_medicine(&MedicineId::new("nope")).await.is_none());
    }

    #[tokio::test]
    async fn test_create_then_get_returns_same_fields() {
        let db = Database::seeded().unwrap();
        let repo = CatalogRepository::new(&db);

        let created = repo.create_medicine(new_medicine("cat4")).await.unwrap();
        let fetched = repo.get_medicine(&created.id).await.unwrap();

        assert_eq!(fetched.medicine, created);
        assert_eq!(fetched.medicine.average_rating.to_string(), "0.0");
        assert_eq!(fetched.medicine.review_count, 0);
        assert_eq!(fetched.reviews.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_create_medicine_requires_existing_category() {
        let db = Database::seeded().unwrap();
        let err = CatalogRepository::new(&db)
            .create_medicine(new_medicine("cat99"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_create_category_rejects_duplicate_slug() {
        let db = Database::seeded().unwrap();
        let repo = CatalogRepository::new(&db);

        let new = |slug: &str| NewCategory {
            name: "Baby Care".to_owned(),
            slug: slug.to_owned(),
            icon: "fas fa-baby".to_owned(),
            description: None,
            item_count: 0,
        };

        let created = repo.create_category(new("baby-care")).await.unwrap();
        assert_eq!(
            repo.get_category_by_slug("baby-care").await.unwrap().id,
            created.id
        );
        assert!(matches!(
            repo.create_category(new("vitamins")).await,
            Err(RepositoryError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_update_stock_changes_status() {
        let db = Database::seeded().unwrap();
        let repo = CatalogRepository::new(&db);
        let id = MedicineId::new("med1");

        assert_eq!(
            repo.get_medicine(&id).await.unwrap().stock_status,
            StockStatus::InStock
        );

        let updated = repo.update_stock(&id, 0).await.unwrap();
        assert_eq!(updated.stock_count, 0);
        assert_eq!(
            repo.get_medicine(&id).await.unwrap().stock_status,
            StockStatus::OutOfStock
        );

        assert!(matches!(
            repo.update_stock(&MedicineId::new("nope"), 5).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_seeded_stock_statuses() {
        let db = Database::seeded().unwrap();
        let repo = CatalogRepository::new(&db);

        let med2 = repo.get_medicine(&MedicineId::new("med2")).await.unwrap();
        assert_eq!(med2.stock_status, StockStatus::LowStock);

        let med1 = repo.get_medicine(&MedicineId::new("med1")).await.unwrap();
        assert_eq!(med1.stock_status, StockStatus::InStock);
    }
}
