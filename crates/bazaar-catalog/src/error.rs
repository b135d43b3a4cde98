//! Catalog error types.

use thiserror::Error;

/// Errors that can occur in catalog, wishlist and rewards operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Unknown marketplace name.
    #[error("Unknown source: {0}")]
    UnknownSource(String),

    /// Unknown sort option name.
    #[error("Unknown sort option: {0}")]
    UnknownSortOption(String),

    /// Unknown page name.
    #[error("Unknown page: {0}")]
    UnknownPage(String),

    /// Variant group has no options.
    #[error("Variant group '{0}' has no options")]
    EmptyVariantGroup(String),

    /// Variant group or option not found on a product.
    #[error("Variant not found: {group}={option}")]
    VariantNotFound { group: String, option: String },

    /// Not enough coins for a redemption.
    #[error("Insufficient coins: need {needed}, have {available}")]
    InsufficientCoins { needed: u64, available: u64 },

    /// Unknown redeem option id.
    #[error("Unknown reward: {0}")]
    UnknownReward(String),

    /// Daily spins used up.
    #[error("No spins left today")]
    NoSpinsLeft,

    /// Another purchase is still being processed.
    #[error("Purchase already in progress for product {0}")]
    PurchaseInProgress(String),

    /// Completing a purchase that was never started.
    #[error("No purchase in progress for product {0}")]
    PurchaseNotStarted(String),

    /// Storage error.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<bazaar_store::StoreError> for CatalogError {
    fn from(e: bazaar_store::StoreError) -> Self {
        CatalogError::StorageError(e.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::SerializationError(e.to_string())
    }
}
