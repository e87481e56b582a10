//! Catalog search and predicate filtering.
//!
//! Pure functions only; the current [`FilterState`] is owned by the caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::domain::{Category, MenuItem};

/// Mutually exclusive filter applied on top of the text query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterPredicate {
    #[default]
    All,
    VegOnly,
    NonVegOnly,
    BestsellerOnly,
}

impl FilterPredicate {
    pub fn all() -> [FilterPredicate; 4] {
        [
            FilterPredicate::All,
            FilterPredicate::VegOnly,
            FilterPredicate::NonVegOnly,
            FilterPredicate::BestsellerOnly,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterPredicate::All => "🍽️ All",
            FilterPredicate::VegOnly => "🥬 Veg",
            FilterPredicate::NonVegOnly => "🍖 Non-Veg",
            FilterPredicate::BestsellerOnly => "⭐ Popular",
        }
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        match self {
            FilterPredicate::All => true,
            FilterPredicate::VegOnly => item.is_veg,
            FilterPredicate::NonVegOnly => !item.is_veg,
            FilterPredicate::BestsellerOnly => item.is_best_seller,
        }
    }

    /// Next predicate in pill order, wrapping around.
    pub fn next(&self) -> Self {
        match self {
            FilterPredicate::All => FilterPredicate::VegOnly,
            FilterPredicate::VegOnly => FilterPredicate::NonVegOnly,
            FilterPredicate::NonVegOnly => FilterPredicate::BestsellerOnly,
            FilterPredicate::BestsellerOnly => FilterPredicate::All,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FilterPredicate::All => FilterPredicate::BestsellerOnly,
            FilterPredicate::VegOnly => FilterPredicate::All,
            FilterPredicate::NonVegOnly => FilterPredicate::VegOnly,
            FilterPredicate::BestsellerOnly => FilterPredicate::NonVegOnly,
        }
    }
}

impl fmt::Display for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FilterPredicate::All => "all",
            FilterPredicate::VegOnly => "veg",
            FilterPredicate::NonVegOnly => "nonveg",
            FilterPredicate::BestsellerOnly => "bestseller",
        };
        f.write_str(s)
    }
}

impl FromStr for FilterPredicate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(FilterPredicate::All),
            "veg" | "veg-only" => Ok(FilterPredicate::VegOnly),
            "nonveg" | "non-veg" => Ok(FilterPredicate::NonVegOnly),
            "bestseller" | "popular" => Ok(FilterPredicate::BestsellerOnly),
            other => Err(format!(
                "unknown filter '{}', expected one of: all, veg, nonveg, bestseller",
                other
            )),
        }
    }
}

/// Live search input plus the selected predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub predicate: FilterPredicate,
}

impl FilterState {
    pub fn new(query: impl Into<String>, predicate: FilterPredicate) -> Self {
        Self {
            query: query.into(),
            predicate,
        }
    }

    /// True when the user has asked for anything other than the full menu.
    /// Stricter than [`FilteredResult::is_active`], which only compares sizes.
    pub fn is_narrowing(&self) -> bool {
        !self.query.trim().is_empty() || self.predicate != FilterPredicate::All
    }

    pub fn apply<'a>(&self, catalog: &'a [MenuItem]) -> FilteredResult<'a> {
        CatalogFilter::apply(catalog, &self.query, self.predicate)
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.predicate = FilterPredicate::All;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilteredResult<'a> {
    /// Matching items, in catalog order.
    pub items: Vec<&'a MenuItem>,
    /// `items.len() != catalog.len()`. A filter that matches everything
    /// reads as inactive.
    pub is_active: bool,
}

impl FilteredResult<'_> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

pub struct CatalogFilter;

impl CatalogFilter {
    pub fn apply<'a>(
        catalog: &'a [MenuItem],
        query: &str,
        predicate: FilterPredicate,
    ) -> FilteredResult<'a> {
        let needle = query.trim().to_lowercase();

        let items: Vec<&MenuItem> = catalog
            .iter()
            .filter(|item| needle.is_empty() || item.matches_text(&needle))
            .filter(|item| predicate.matches(item))
            .collect();

        let is_active = items.len() != catalog.len();
        debug!(
            query = %needle,
            predicate = %predicate,
            matched = items.len(),
            total = catalog.len(),
            "Catalog filter applied"
        );

        FilteredResult { items, is_active }
    }
}

/// One rendered category block.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSection<'a> {
    pub category: &'a Category,
    pub items: Vec<&'a MenuItem>,
}

/// Build display sections in `Category.order`.
///
/// Inactive results render every category with its full item list, even a
/// category that has no items. Active results partition the filtered subset
/// by `category_id` and omit empty partitions. Orphaned items never appear.
/// An empty return means the caller should show a single "no results" message.
pub fn group_sections<'a>(catalog: &'a Catalog, result: &FilteredResult<'a>) -> Vec<MenuSection<'a>> {
    catalog
        .sorted_categories()
        .into_iter()
        .filter_map(|category| {
            if !result.is_active {
                return Some(MenuSection {
                    category,
                    items: catalog.items_in(&category.id),
                });
            }
            let items: Vec<&MenuItem> = result
                .items
                .iter()
                .copied()
                .filter(|item| item.category_id == category.id)
                .collect();
            (!items.is_empty()).then_some(MenuSection { category, items })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<MenuItem> {
        vec![
            MenuItem::new("v3", "Truffle Risotto", "Creamy Arborio rice with black truffle", 695, "veg", true),
            MenuItem::new("n1", "Butter Chicken", "Tender tandoori chicken", 545, "nonveg", false).best_seller(),
            MenuItem::new("v4", "Thai Green Curry", "Fragrant coconut curry", 495, "veg", true).spicy(),
            MenuItem::new("n2", "Lamb Rogan Josh", "Slow-cooked lamb in red curry", 695, "nonveg", false),
        ]
    }

    fn ids(result: &FilteredResult<'_>) -> Vec<String> {
        result.items.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let catalog = items();
        let result = CatalogFilter::apply(&catalog, "", FilterPredicate::All);
        assert!(!result.is_active);
        assert_eq!(result.len(), catalog.len());

        let result = CatalogFilter::apply(&catalog, "   ", FilterPredicate::All);
        assert!(!result.is_active);
    }

    #[test]
    fn test_text_match_case_insensitive() {
        let catalog = items();
        let result = CatalogFilter::apply(&catalog, "TRUFFLE", FilterPredicate::All);
        assert_eq!(ids(&result), vec!["v3"]);
        assert!(result.is_active);
    }

    #[test]
    fn test_description_match() {
        let catalog = items();
        let result = CatalogFilter::apply(&catalog, "tandoori", FilterPredicate::All);
        assert_eq!(ids(&result), vec!["n1"]);
    }

    #[test]
    fn test_predicates() {
        let catalog = items();
        assert_eq!(ids(&CatalogFilter::apply(&catalog, "", FilterPredicate::VegOnly)), vec!["v3", "v4"]);
        assert_eq!(ids(&CatalogFilter::apply(&catalog, "", FilterPredicate::NonVegOnly)), vec!["n1", "n2"]);
        assert_eq!(ids(&CatalogFilter::apply(&catalog, "", FilterPredicate::BestsellerOnly)), vec!["n1"]);
    }

    #[test]
    fn test_query_and_predicate_intersect() {
        let catalog = items();
        let result = CatalogFilter::apply(&catalog, "curry", FilterPredicate::VegOnly);
        assert_eq!(ids(&result), vec!["v4"]);
    }

    #[test]
    fn test_empty_catalog() {
        let result = CatalogFilter::apply(&[], "anything", FilterPredicate::VegOnly);
        assert!(result.is_empty());
        assert!(!result.is_active);
    }

    #[test]
    fn test_predicate_matching_all_reads_inactive() {
        let catalog: Vec<MenuItem> = items().into_iter().filter(|i| i.is_veg).collect();
        let result = CatalogFilter::apply(&catalog, "", FilterPredicate::VegOnly);
        assert!(!result.is_active);
        let state = FilterState::new("", FilterPredicate::VegOnly);
        assert!(state.is_narrowing());
    }

    #[test]
    fn test_filter_state_clear() {
        let mut state = FilterState::new("curry", FilterPredicate::BestsellerOnly);
        state.clear();
        assert_eq!(state, FilterState::default());
        assert!(!state.is_narrowing());
    }

    #[test]
    fn test_predicate_cycle() {
        let mut p = FilterPredicate::All;
        for _ in 0..4 {
            p = p.next();
        }
        assert_eq!(p, FilterPredicate::All);
        assert_eq!(FilterPredicate::All.prev(), FilterPredicate::BestsellerOnly);
        assert_eq!(FilterPredicate::VegOnly.next().prev(), FilterPredicate::VegOnly);
    }

    #[test]
    fn test_predicate_from_str() {
        assert_eq!("Veg".parse::<FilterPredicate>(), Ok(FilterPredicate::VegOnly));
        assert_eq!("popular".parse::<FilterPredicate>(), Ok(FilterPredicate::BestsellerOnly));
        assert!("vegan".parse::<FilterPredicate>().is_err());
        for p in FilterPredicate::all() {
            assert_eq!(p.to_string().parse::<FilterPredicate>(), Ok(p));
        }
    }

    #[test]
    fn test_group_sections_skips_orphans_and_empty_matches() {
        let mut catalog = Catalog::new(
            vec![
                Category::new("nonveg", "Non-Vegetarian", "🍖", "#dc2626", 2),
                Category::new("veg", "Vegetarian", "🥬", "#22c55e", 1),
                Category::new("drinks", "Beverages", "🍹", "#3b82f6", 3),
            ],
            items(),
        );
        catalog
            .items
            .push(MenuItem::new("x1", "Mystery Curry", "", 100, "brunch", true));

        let result = CatalogFilter::apply(&catalog.items, "", FilterPredicate::All);
        let sections = group_sections(&catalog, &result);
        let names: Vec<&str> = sections.iter().map(|s| s.category.id.as_str()).collect();
        assert_eq!(names, vec!["veg", "nonveg", "drinks"]);
        assert!(sections[2].items.is_empty());
        assert_eq!(sections.iter().map(|s| s.items.len()).sum::<usize>(), 4);

        let result = CatalogFilter::apply(&catalog.items, "curry", FilterPredicate::All);
        assert!(result.is_active);
        let sections = group_sections(&catalog, &result);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].items.len(), 1);
        assert_eq!(sections[1].items[0].id, "n2");

        let result = CatalogFilter::apply(&catalog.items, "pizza", FilterPredicate::All);
        assert!(group_sections(&catalog, &result).is_empty());
    }

    #[test]
    fn test_unfiltered_menu_keeps_empty_category() {
        let catalog = Catalog::new(
            vec![
                Category::new("veg", "Vegetarian", "🥬", "#22c55e", 1),
                Category::new("drinks", "Beverages", "🍹", "#3b82f6", 2),
            ],
            vec![
                MenuItem::new("v1", "Paneer Tikka", "Smoky cottage cheese", 395, "veg", true),
                MenuItem::new("v2", "Dal Makhani", "Black lentils, slow cooked", 345, "veg", true),
            ],
        );

        let result = CatalogFilter::apply(&catalog.items, "", FilterPredicate::All);
        assert!(!result.is_active);
        let sections = group_sections(&catalog, &result);
        let ids: Vec<&str> = sections.iter().map(|s| s.category.id.as_str()).collect();
        assert_eq!(ids, vec!["veg", "drinks"]);
        assert_eq!(sections[0].items.len(), 2);
        assert!(sections[1].items.is_empty());

        // once filtering, the empty category disappears
        let result = CatalogFilter::apply(&catalog.items, "paneer", FilterPredicate::All);
        let sections = group_sections(&catalog, &result);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].category.id, "veg");
    }
}
