// ============================================================================
// Menu Core - Menu Item Entity
// File: crates/menu-core/src/domain/menu_item.rs
// Description: A single dish on the menu
// ============================================================================

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MenuItem {
    #[validate(length(min = 1, max = 64, message = "Item id must be between 1 and 64 characters"))]
    pub id: String,

    #[validate(length(min = 1, max = 120, message = "Item name must be between 1 and 120 characters"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Whole currency units, no minor unit.
    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price: u32,

    #[serde(default)]
    pub image: Option<String>,

    /// References `Category::id`. Items whose category is missing are never displayed.
    #[validate(length(min = 1, message = "Item must reference a category"))]
    pub category_id: String,

    pub is_veg: bool,

    #[serde(default)]
    pub is_best_seller: bool,

    #[serde(default)]
    pub is_spicy: bool,

    #[serde(default)]
    pub is_chefs_pick: bool,
}

impl MenuItem {
    pub fn new(id: &str, name: &str, description: &str, price: u32, category_id: &str, is_veg: bool) -> Self {
        Self {
            id: id.trim().to_string(),
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            price,
            image: None,
            category_id: category_id.trim().to_string(),
            is_veg,
            is_best_seller: false,
            is_spicy: false,
            is_chefs_pick: false,
        }
    }

    pub fn best_seller(mut self) -> Self {
        self.is_best_seller = true;
        self
    }

    pub fn spicy(mut self) -> Self {
        self.is_spicy = true;
        self
    }

    pub fn chefs_pick(mut self) -> Self {
        self.is_chefs_pick = true;
        self
    }

    /// Case-insensitive substring match against name or description.
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }

    pub fn formatted_price(&self) -> String {
        format!("₹{}", self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_item() {
        let item = MenuItem::new("n1", "Butter Chicken", "Tender tandoori chicken", 545, "nonveg", false)
            .best_seller();
        assert!(item.validate().is_ok());
        assert!(item.is_best_seller);
        assert!(!item.is_spicy);
        assert_eq!(item.formatted_price(), "₹545");
    }

    #[test]
    fn test_zero_price_rejected() {
        let item = MenuItem::new("x", "Free Water", "", 0, "drinks", true);
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_matches_text_either_field() {
        let item = MenuItem::new("v3", "Truffle Risotto", "Creamy Arborio rice", 695, "veg", true);
        assert!(item.matches_text("truffle"));
        assert!(item.matches_text("arborio"));
        assert!(!item.matches_text("chicken"));
    }
}
