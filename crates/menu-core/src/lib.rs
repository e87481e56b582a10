//! # Menu Core
//!
//! Engine behind the Saffron & Spice digital menu.
//!
//! - [`filter`]: search text plus veg / non-veg / bestseller predicate over the
//!   static catalog, and grouping of the result into category sections.
//! - [`tracker`]: scroll-spy that turns section visibility into one active
//!   category, with a grace window after forced navigation.
//! - [`viewport`]: section geometry and visibility measurement against the
//!   band near the top of the viewport.
//!
//! The presentation layer owns all mutable UI state and passes it in.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod progress;
pub mod telemetry;
pub mod tracker;
pub mod viewport;

pub use catalog::{Catalog, RestaurantInfo, ValidationReport};
pub use config::Settings;
pub use domain::{Category, MenuItem};
pub use error::{MenuError, Result};
pub use filter::{group_sections, CatalogFilter, FilterPredicate, FilterState, FilteredResult, MenuSection};
pub use tracker::{ActiveSectionTracker, ScrollDriver, TrackerState};
pub use viewport::{SectionLayout, SectionVisibility, VisibilityBand};
