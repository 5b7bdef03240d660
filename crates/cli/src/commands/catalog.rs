//! Catalog seed commands.
//!
//! Seeds are the YAML documents the storefront loads at startup
//! (`HEALWELL_CATALOG_SEED`). These commands check a seed before deploying it
//! and dump the built-in demo catalog as a starting point for a new one.

use std::io::Write;
use std::path::Path;

use tracing::{error, info};

use healwell_storefront::db::seed::{self, CatalogSeed, validate_seed};

/// Validate a seed file without starting the server.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if validation
/// finds problems (each one is logged).
pub async fn validate(file_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !file_path.exists() {
        return Err(format!("File not found: {}", file_path.display()).into());
    }

    info!(path = %file_path.display(), "Loading catalog seed");
    let catalog = CatalogSeed::from_file(file_path).await?;

    let problems = check(&catalog);
    if !problems.is_empty() {
        error!("Catalog validation failed:");
        for problem in &problems {
            error!("  - {problem}");
        }
        return Err(format!("{} validation errors found", problems.len()).into());
    }

    info!("Catalog validated successfully");
    log_counts(&catalog);
    Ok(())
}

/// Print a seed as YAML to stdout.
///
/// With no `from` path the built-in demo catalog is exported.
///
/// # Errors
///
/// Returns an error if the seed cannot be loaded or stdout cannot be written.
pub async fn export(from: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = seed::load(from).await?;
    let yaml = catalog.to_yaml()?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(yaml.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Show row counts for a seed.
///
/// # Errors
///
/// Returns an error if the seed cannot be loaded.
pub async fn stats(from: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = seed::load(from).await?;

    info!("Catalog Statistics");
    info!("==================");
    log_counts(&catalog);

    let inactive = catalog.medicines.iter().filter(|m| !m.is_active).count();
    let prescription = catalog
        .medicines
        .iter()
        .filter(|m| m.requires_prescription)
        .count();
    info!("Inactive medicines: {inactive}");
    info!("Prescription-only medicines: {prescription}");

    info!("By category:");
    for category in &catalog.categories {
        let count = catalog
            .medicines
            .iter()
            .filter(|m| m.category_id == category.id)
            .count();
        info!("  {} ({}): {count}", category.name, category.slug);
    }

    Ok(())
}

/// Validation problems for a parsed seed. Empty means valid.
fn check(catalog: &CatalogSeed) -> Vec<String> {
    let mut problems = validate_seed(catalog);
    if catalog.medicines.is_empty() {
        problems.push("catalog has no medicines; the storefront would never report ready".into());
    }
    problems
}

fn log_counts(catalog: &CatalogSeed) {
    info!("Categories: {}", catalog.categories.len());
    info!("Medicines: {}", catalog.medicines.len());
    info!("Reviews: {}", catalog.reviews.len());
}
