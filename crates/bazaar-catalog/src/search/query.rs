//! Sort options, pages and the catalog query builder.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::catalog::{category, Product};
use crate::ids::ProductId;
use crate::search::{select_visible_products, FilterState};
use crate::CatalogError;
use serde::{Deserialize, Serialize};

/// Sort order for visible products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Keep catalog order.
    #[default]
    Relevance,
    /// Price, low to high.
    PriceLow,
    /// Price, high to low.
    PriceHigh,
    /// Rating, high to low.
    Rating,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::Relevance,
        SortOption::PriceLow,
        SortOption::PriceHigh,
        SortOption::Rating,
    ];

    /// Wire name, as used in saved filter state.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Relevance => "relevance",
            SortOption::PriceLow => "price_low",
            SortOption::PriceHigh => "price_high",
            SortOption::Rating => "rating",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Relevance => "Relevance",
            SortOption::PriceLow => "Price: Low to High",
            SortOption::PriceHigh => "Price: High to Low",
            SortOption::Rating => "Highest Rated",
        }
    }

    /// Ordering of two products under this option. `Relevance` treats every
    /// pair as equal so a stable sort keeps input order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Relevance => Ordering::Equal,
            SortOption::PriceLow => a.price.total_cmp(&b.price),
            SortOption::PriceHigh => b.price.total_cmp(&a.price),
            SortOption::Rating => b.rating.total_cmp(&a.rating),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str() == s.trim())
            .ok_or_else(|| CatalogError::UnknownSortOption(s.to_string()))
    }
}

/// Application page. Decides which list feeds the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    Wholesale,
    Orders,
    Rewards,
    Game,
    Wishlist,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::Wholesale,
        Page::Orders,
        Page::Rewards,
        Page::Game,
        Page::Wishlist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Wholesale => "wholesale",
            Page::Orders => "orders",
            Page::Rewards => "rewards",
            Page::Game => "game",
            Page::Wishlist => "wishlist",
        }
    }

    /// Whether the page lists products at all.
    pub fn shows_products(&self) -> bool {
        matches!(self, Page::Home | Page::Wholesale | Page::Wishlist)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownPage(s.to_string()))
    }
}

/// Everything that decides the visible product list, apart from the lists
/// themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    pub page: Page,
    pub category: String,
    pub search: String,
    pub filters: FilterState,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogQuery {
    /// Home page, every category, no search text, no filters.
    pub fn new() -> Self {
        Self {
            page: Page::Home,
            category: category::ALL.to_string(),
            search: String::new(),
            filters: FilterState::default(),
        }
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self
    }

    /// Run the pipeline over the given lists.
    pub fn run<'a>(
        &self,
        wishlist: &BTreeSet<ProductId>,
        retail: &'a [Product],
        wholesale: &'a [Product],
    ) -> Vec<&'a Product> {
        select_visible_products(
            self.page,
            &self.category,
            &self.search,
            &self.filters,
            wishlist,
            retail,
            wholesale,
        )
    }
}
