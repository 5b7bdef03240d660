//! Catalog seed data.
//!
//! The store is populated once at startup, either from the demo catalog
//! embedded in the binary or from a YAML file named by
//! `HEALWELL_CATALOG_SEED`.
//!
//! ## YAML Format
//!
//! ```yaml
//! categories:
//!   - id: cat1
//!     name: Pain Relief
//!     slug: pain-relief
//!     icon: fas fa-tablets
//! medicines:
//!   - id: med1
//!     name: Paracetamol 500mg
//!     description: Strip of 10 tablets
//!     categoryId: cat1
//!     price: "24.50"
//!     stockCount: 45
//! reviews:
//!   - id: rev1
//!     medicineId: med1
//!     customerName: Rajesh Kumar
//!     rating: 5
//!     comment: Quick relief.
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::models::{Category, Medicine, Review};

/// Demo catalog compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../../seed/catalog.yaml");

/// Errors loading or validating a catalog seed.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The seed is not valid YAML for the expected shape.
    #[error("failed to parse catalog seed: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The seed parsed but breaks referential or uniqueness rules.
    #[error("invalid catalog seed: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Full seed document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub medicines: Vec<Medicine>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl CatalogSeed {
    /// The demo catalog embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Parse` if the embedded YAML is malformed.
    pub fn builtin() -> Result<Self, SeedError> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    /// Parse a seed from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Parse` if the YAML does not match the seed shape.
    pub fn from_yaml(content: &str) -> Result<Self, SeedError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and parse a seed file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SeedError::Io {
                path: path.display().to_string(),
                source,
            })?;

        let seed = Self::from_yaml(&content)?;
        info!(
            categories = seed.categories.len(),
            medicines = seed.medicines.len(),
            reviews = seed.reviews.len(),
            "Loaded catalog seed"
        );
        Ok(seed)
    }

    /// Serialize the seed back to YAML.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Parse` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, SeedError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Load the seed from `path` if given, otherwise the built-in catalog.
///
/// # Errors
///
/// Returns an error if the seed cannot be read or parsed.
pub async fn load(path: Option<&Path>) -> Result<CatalogSeed, SeedError> {
    match path {
        Some(path) => CatalogSeed::from_file(path).await,
        None => CatalogSeed::builtin(),
    }
}

/// Check a seed for duplicate keys and dangling references.
///
/// Returns one message per problem; an empty list means the seed is valid.
#[must_use]
pub fn validate_seed(seed: &CatalogSeed) -> Vec<String> {
    let mut problems = Vec::new();

    let mut category_ids = HashSet::new();
    let mut slugs = HashSet::new();
    for category in &seed.categories {
        if !category_ids.insert(&category.id) {
            problems.push(format!("duplicate category id '{}'", category.id));
        }
        if !slugs.insert(category.slug.as_str()) {
            problems.push(format!("duplicate category slug '{}'", category.slug));
        }
    }

    let mut medicine_ids = HashSet::new();
    for medicine in &seed.medicines {
        if !medicine_ids.insert(&medicine.id) {
            problems.push(format!("duplicate medicine id '{}'", medicine.id));
        }
        if !category_ids.contains(&medicine.category_id) {
            problems.push(format!(
                "medicine '{}' references unknown category '{}'",
                medicine.id, medicine.category_id
            ));
        }
    }

    let mut review_ids = HashSet::new();
    for review in &seed.reviews {
        if !review_ids.insert(&review.id) {
            problems.push(format!("duplicate review id '{}'", review.id));
        }
        if !medicine_ids.contains(&review.medicine_id) {
            problems.push(format!(
                "review '{}' references unknown medicine '{}'",
                review.id, review.medicine_id
            ));
        }
    }

    problems
}
