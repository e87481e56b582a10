// ============================================================================
// Menu Core - Category Entity
// File: crates/menu-core/src/domain/category.rs
// Description: Menu category (one page section per category)
// ============================================================================

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Menu category entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Category {
    #[validate(length(min = 1, max = 64, message = "Category id must be between 1 and 64 characters"))]
    pub id: String,

    #[validate(length(min = 1, max = 100, message = "Category name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(max = 16, message = "Category icon too long"))]
    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub background_image: Option<String>,

    /// `#RRGGBB`
    pub accent_color: String,

    #[validate(range(min = 0, message = "Category order must not be negative"))]
    pub order: i32,
}

impl Category {
    pub fn new(id: &str, name: &str, icon: &str, accent_color: &str, order: i32) -> Self {
        Self {
            id: id.trim().to_string(),
            name: name.trim().to_string(),
            icon: icon.to_string(),
            background_image: None,
            accent_color: accent_color.trim().to_string(),
            order,
        }
    }

    /// Accent colour as an RGB triple, `None` when not `#RRGGBB`.
    pub fn accent_rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.accent_color)
    }
}

pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
