//! # Menu Core - Domain Module
//!
//! Static menu entities: categories and the dishes filed under them.

pub mod category;
pub mod menu_item;

pub use category::Category;
pub use menu_item::MenuItem;
