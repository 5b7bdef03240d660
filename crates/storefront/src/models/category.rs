//! Catalog categories.

use serde::{Deserialize, Serialize};

use healwell_core::CategoryId;

/// A catalog category (e.g. "Pain Relief").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// URL-safe unique key, matched exactly and case-sensitively.
    pub slug: String,
    /// Icon class shown next to the category name.
    pub icon: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Cached display count; not recomputed from the medicine table.
    #[serde(default)]
    pub item_count: u32,
}

/// Input for creating a category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub icon: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub item_count: u32,
}

impl NewCategory {
    /// Attach an id, producing the stored category.
    #[must_use]
    pub fn into_category(self, id: CategoryId) -> Category {
        Category {
            id,
            name: self.name,
            slug: self.slug,
            icon: self.icon,
            description: self.description,
            item_count: self.item_count,
        }
    }
}
