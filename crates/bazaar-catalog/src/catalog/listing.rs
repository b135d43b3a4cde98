//! The in-memory catalog: retail and wholesale listings.

use rand::Rng;

use crate::affiliate::AffiliateConfig;
use crate::catalog::{category, seed, Product};
use crate::ids::ProductId;
use crate::CatalogError;
use serde::{Deserialize, Serialize};

const BUILTIN_BASE: &str = include_str!("../../data/base_catalog.json");

/// Hand-written base listings, before expansion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseCatalog {
    #[serde(default)]
    pub retail: Vec<Product>,
    #[serde(default)]
    pub wholesale: Vec<Product>,
}

impl BaseCatalog {
    /// Parse a base catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The base catalog shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_BASE)
    }
}

/// How far to expand a base catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedOptions {
    pub retail_per_category: usize,
    pub wholesale_per_category: usize,
    /// First id used for generated retail listings.
    pub retail_id_base: u32,
    /// First id used for generated wholesale listings.
    pub wholesale_id_base: u32,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            retail_per_category: 200,
            wholesale_per_category: 50,
            retail_id_base: 10_000,
            wholesale_id_base: 20_000,
        }
    }
}

/// Retail and wholesale product lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    retail: Vec<Product>,
    wholesale: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from ready-made lists.
    pub fn new(retail: Vec<Product>, wholesale: Vec<Product>) -> Self {
        Self { retail, wholesale }
    }

    /// Expand `base` into a full catalog.
    pub fn generate<R: Rng + ?Sized>(
        base: &BaseCatalog,
        options: &SeedOptions,
        affiliate: &AffiliateConfig,
        rng: &mut R,
    ) -> Self {
        let retail = seed::extend_products(
            &base.retail,
            options.retail_per_category,
            options.retail_id_base,
            affiliate,
            rng,
        );
        let wholesale = seed::extend_products(
            &base.wholesale,
            options.wholesale_per_category,
            options.wholesale_id_base,
            affiliate,
            rng,
        );
        tracing::info!(
            retail = retail.len(),
            wholesale = wholesale.len(),
            "catalog generated"
        );
        Self { retail, wholesale }
    }

    /// Expand the built-in base catalog.
    pub fn builtin<R: Rng + ?Sized>(
        options: &SeedOptions,
        affiliate: &AffiliateConfig,
        rng: &mut R,
    ) -> Result<Self, CatalogError> {
        Ok(Self::generate(&BaseCatalog::builtin()?, options, affiliate, rng))
    }

    pub fn retail(&self) -> &[Product] {
        &self.retail
    }

    pub fn wholesale(&self) -> &[Product] {
        &self.wholesale
    }

    /// Find a product in either list, retail first.
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.retail
            .iter()
            .chain(self.wholesale.iter())
            .find(|p| p.id == id)
    }

    /// Find a product or fail with [`CatalogError::ProductNotFound`].
    pub fn get(&self, id: ProductId) -> Result<&Product, CatalogError> {
        self.find(id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))
    }

    /// Category names for navigation, with the [`ALL`](category::ALL) sentinel
    /// first for retail.
    pub fn categories(&self, wholesale: bool) -> Vec<&str> {
        let products = if wholesale { &self.wholesale } else { &self.retail };
        let mut names: Vec<&str> = if wholesale { Vec::new() } else { vec![category::ALL] };
        for product in products {
            if !names.contains(&product.category.as_str()) {
                names.push(&product.category);
            }
        }
        names
    }

    pub fn len(&self) -> usize {
        self.retail.len() + self.wholesale.len()
    }

    pub fn is_empty(&self) -> bool {
        self.retail.is_empty() && self.wholesale.is_empty()
    }
}
