//! Static menu catalog: loading, validation and category lookups.
//!
//! The reference catalog is compiled in from `data/menu.toml`. Another catalog
//! can be loaded from disk with [`Catalog::from_path`]; both paths run the same
//! validation pass.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use crate::domain::{category::parse_hex_color, Category, MenuItem};
use crate::error::{MenuError, Result};

const REFERENCE_MENU: &str = include_str!("../data/menu.toml");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestaurantInfo {
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub hero_image: Option<String>,
}

/// Outcome of [`Catalog::validate`] for problems that are tolerated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// `(item id, missing category id)`
    pub orphaned_items: Vec<(String, String)>,
    /// Categories with no items at all.
    pub empty_categories: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.orphaned_items.is_empty() && self.empty_categories.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub restaurant: RestaurantInfo,
    pub categories: Vec<Category>,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl Catalog {
    /// The compiled-in "Saffron & Spice" menu.
    pub fn reference() -> Result<Self> {
        Self::from_toml_str(REFERENCE_MENU)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        info!("Loading catalog from {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(content)?;
        let report = catalog.validate()?;
        info!(
            categories = catalog.categories.len(),
            items = catalog.items.len(),
            orphaned = report.orphaned_items.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    pub fn new(categories: Vec<Category>, items: Vec<MenuItem>) -> Self {
        Self {
            restaurant: RestaurantInfo::default(),
            categories,
            items,
        }
    }

    /// Field and structural validation.
    ///
    /// Duplicate ids, bad fields and an empty category list are errors.
    /// Orphaned items are logged and reported; they stay in `items` but no
    /// category section will ever contain them.
    pub fn validate(&self) -> Result<ValidationReport> {
        if self.categories.is_empty() {
            return Err(MenuError::NoCategories);
        }

        let mut category_ids = HashSet::new();
        for category in &self.categories {
            category.validate().map_err(|source| MenuError::InvalidEntity {
                entity: "category",
                id: category.id.clone(),
                source,
            })?;
            if parse_hex_color(&category.accent_color).is_none() {
                return Err(MenuError::InvalidAccentColor {
                    id: category.id.clone(),
                    color: category.accent_color.clone(),
                });
            }
            if !category_ids.insert(category.id.as_str()) {
                return Err(MenuError::DuplicateId {
                    entity: "category",
                    id: category.id.clone(),
                });
            }
        }

        let mut item_ids = HashSet::new();
        let mut report = ValidationReport::default();
        for item in &self.items {
            item.validate().map_err(|source| MenuError::InvalidEntity {
                entity: "item",
                id: item.id.clone(),
                source,
            })?;
            if !item_ids.insert(item.id.as_str()) {
                return Err(MenuError::DuplicateId {
                    entity: "item",
                    id: item.id.clone(),
                });
            }
            if !category_ids.contains(item.category_id.as_str()) {
                warn!(
                    item = %item.id,
                    category = %item.category_id,
                    "Menu item references unknown category, it will not be displayed"
                );
                report
                    .orphaned_items
                    .push((item.id.clone(), item.category_id.clone()));
            }
        }

        for category in &self.categories {
            if !self.items.iter().any(|i| i.category_id == category.id) {
                report.empty_categories.push(category.id.clone());
            }
        }

        Ok(report)
    }

    /// Categories by `order` ascending; equal orders keep declaration order.
    pub fn sorted_categories(&self) -> Vec<&Category> {
        let mut sorted: Vec<&Category> = self.categories.iter().collect();
        sorted.sort_by_key(|c| c.order);
        sorted
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn items_in(&self, category_id: &str) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|item| item.category_id == category_id)
            .collect()
    }

    /// Section ids in display order, as registered with the tracker.
    pub fn section_ids(&self) -> Vec<String> {
        self.sorted_categories()
            .into_iter()
            .map(|c| c.id.clone())
            .collect()
    }

    pub fn first_section_id(&self) -> Option<&str> {
        self.sorted_categories().first().map(|c| c.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_catalog() -> Catalog {
        Catalog::new(
            vec![
                Category::new("mains", "Mains", "🍛", "#dc2626", 2),
                Category::new("starters", "Starters", "🥗", "#f59e0b", 1),
            ],
            vec![
                MenuItem::new("a", "Soup", "Hot soup", 100, "starters", true),
                MenuItem::new("b", "Curry", "Red curry", 300, "mains", false),
            ],
        )
    }

    #[test]
    fn test_reference_catalog_loads() {
        let catalog = Catalog::reference().unwrap();
        assert_eq!(catalog.categories.len(), 6);
        assert_eq!(catalog.items.len(), 21);
        assert_eq!(catalog.restaurant.name, "Saffron & Spice");
        assert!(catalog.validate().unwrap().is_clean());
    }

    #[test]
    fn test_sorted_categories_by_order() {
        let catalog = small_catalog();
        let ids: Vec<&str> = catalog.sorted_categories().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["starters", "mains"]);
        assert_eq!(catalog.first_section_id(), Some("starters"));
        assert_eq!(catalog.section_ids(), vec!["starters".to_string(), "mains".to_string()]);
    }

    #[test]
    fn test_orphan_is_reported_not_rejected() {
        let mut catalog = small_catalog();
        catalog
            .items
            .push(MenuItem::new("c", "Ghost", "No home", 50, "brunch", true));
        let report = catalog.validate().unwrap();
        assert_eq!(report.orphaned_items, vec![("c".to_string(), "brunch".to_string())]);
        assert!(catalog.items_in("brunch").len() == 1);
        assert!(catalog.category("brunch").is_none());
    }

    #[test]
    fn test_duplicate_item_id_rejected() {
        let mut catalog = small_catalog();
        catalog
            .items
            .push(MenuItem::new("a", "Other Soup", "", 120, "starters", true));
        assert!(matches!(
            catalog.validate(),
            Err(MenuError::DuplicateId { entity: "item", .. })
        ));
    }

    #[test]
    fn test_bad_accent_color_rejected() {
        let mut catalog = small_catalog();
        catalog.categories[0].accent_color = "red".to_string();
        assert!(matches!(
            catalog.validate(),
            Err(MenuError::InvalidAccentColor { .. })
        ));
    }

    #[test]
    fn test_no_categories_rejected() {
        let catalog = Catalog::new(vec![], vec![]);
        assert!(matches!(catalog.validate(), Err(MenuError::NoCategories)));
    }

    #[test]
    fn test_empty_category_reported() {
        let mut catalog = small_catalog();
        catalog
            .categories
            .push(Category::new("drinks", "Drinks", "🍹", "#3b82f6", 3));
        let report = catalog.validate().unwrap();
        assert_eq!(report.empty_categories, vec!["drinks".to_string()]);
    }

    #[test]
    fn test_parse_error_surfaces() {
        assert!(matches!(
            Catalog::from_toml_str("categories = 3"),
            Err(MenuError::CatalogParse(_))
        ));
    }
}
