//! Product catalog module.
//!
//! Contains products, variants, categories and mock catalog generation.

pub mod category;
mod listing;
mod product;
mod seed;
mod variant;

pub use listing::{BaseCatalog, Catalog, SeedOptions};
pub use product::{Product, Source};
pub use seed::extend_products;
pub use variant::{VariantGroup, VariantKind, VariantOption, VariantSelection};
