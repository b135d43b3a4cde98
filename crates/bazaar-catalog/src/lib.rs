//! Catalog domain types and logic for Bazaar.
//!
//! This crate provides the in-memory side of the shopping app:
//!
//! - **Catalog**: Products, variants, categories and mock catalog generation
//! - **Search**: Filter state, sort options and the visible-products pipeline
//! - **Wishlist**: Saved products persisted to a key-value store
//! - **Rewards**: Coin wallet, daily spin wheel and redeem options
//! - **Checkout**: Simulated single-flight purchases with affiliate redirects
//!
//! # Example
//!
//! ```rust,ignore
//! use bazaar_catalog::prelude::*;
//!
//! let mut rng = rand::thread_rng();
//! let catalog = Catalog::builtin(&SeedOptions::default(), &AffiliateConfig::default(), &mut rng)?;
//!
//! let query = CatalogQuery::new()
//!     .with_category("Dairy & Bakery")
//!     .with_filters(FilterState::new().with_sort(SortOption::PriceLow));
//!
//! let visible = query.run(&BTreeSet::new(), catalog.retail(), catalog.wholesale());
//! ```

pub mod affiliate;
pub mod error;
pub mod ids;

pub mod catalog;
pub mod checkout;
pub mod rewards;
pub mod search;
pub mod wishlist;

pub use error::CatalogError;
pub use ids::ProductId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::affiliate::AffiliateConfig;
    pub use crate::error::CatalogError;
    pub use crate::ids::ProductId;

    // Catalog
    pub use crate::catalog::{
        BaseCatalog, Catalog, Product, SeedOptions, Source, VariantGroup, VariantKind,
        VariantOption, VariantSelection,
    };

    // Search
    pub use crate::search::{
        select_visible_products, CatalogQuery, FilterState, Page, PagedResults, Pagination,
        PriceRange, SortOption,
    };

    // Wishlist, rewards, checkout
    pub use crate::checkout::{PurchaseFlow, PurchaseOutcome, PurchaseStep};
    pub use crate::rewards::{Progress, RedeemOption, Rewards, SpinOutcome, SpinWheel, Wallet};
    pub use crate::wishlist::{PersistentWishlist, Wishlist};
}
