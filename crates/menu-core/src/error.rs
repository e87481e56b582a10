//! Error types for catalog loading and configuration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Catalog parse error: {0}")]
    CatalogParse(#[from] toml::de::Error),

    #[error("Catalog file error: {0}")]
    CatalogIo(#[from] std::io::Error),

    #[error("Invalid {entity} '{id}': {source}")]
    InvalidEntity {
        entity: &'static str,
        id: String,
        #[source]
        source: validator::ValidationErrors,
    },

    #[error("Invalid accent color '{color}' for category '{id}' (expected #RRGGBB)")]
    InvalidAccentColor { id: String, color: String },

    #[error("Duplicate {entity} id: {id}")]
    DuplicateId { entity: &'static str, id: String },

    #[error("Catalog has no categories")]
    NoCategories,

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, MenuError>;
