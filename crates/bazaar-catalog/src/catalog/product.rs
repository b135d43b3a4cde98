//! Product and marketplace source types.

use std::fmt;
use std::str::FromStr;

use crate::catalog::VariantGroup;
use crate::ids::ProductId;
use crate::CatalogError;
use serde::{Deserialize, Serialize};

/// Marketplace a listing is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Source {
    Amazon,
    Flipkart,
    Meesho,
    Snapdeal,
    /// Wholesale-only marketplace.
    Indiamart,
}

impl Source {
    /// Every source, in display order.
    pub const ALL: [Source; 5] = [
        Source::Amazon,
        Source::Flipkart,
        Source::Meesho,
        Source::Snapdeal,
        Source::Indiamart,
    ];

    /// Sources that carry retail listings.
    pub const RETAIL: [Source; 4] = [
        Source::Amazon,
        Source::Flipkart,
        Source::Meesho,
        Source::Snapdeal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Amazon => "Amazon",
            Source::Flipkart => "Flipkart",
            Source::Meesho => "Meesho",
            Source::Snapdeal => "Snapdeal",
            Source::Indiamart => "Indiamart",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Source::ALL
            .into_iter()
            .find(|source| source.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownSource(s.to_string()))
    }
}

/// A product listing in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Listing title.
    pub title: String,
    /// Current price.
    pub price: f64,
    /// List price before discount.
    pub original_price: f64,
    /// Average rating, 0 to 5.
    pub rating: f64,
    /// Image URL or data reference.
    pub image: String,
    /// Marketplace the listing comes from.
    pub source: Source,
    /// Category name (free-form).
    pub category: String,
    /// Outbound marketplace URL.
    pub url: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    /// Bulk listing sold by minimum order quantity.
    #[serde(default)]
    pub is_wholesale: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_order_qty: Option<u32>,
    /// Selectable dimensions such as color or size.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variant_groups: Vec<VariantGroup>,
}

impl Product {
    /// Create a retail product with the required fields; the rest default empty.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: f64,
        rating: f64,
        source: Source,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            original_price: price,
            rating,
            image: String::new(),
            source,
            category: category.into(),
            url: String::new(),
            description: String::new(),
            features: Vec::new(),
            is_wholesale: false,
            min_order_qty: None,
            variant_groups: Vec::new(),
        }
    }

    /// Check if this product has selectable variants.
    pub fn has_variants(&self) -> bool {
        !self.variant_groups.is_empty()
    }

    /// Check if the product is listed below its original price.
    pub fn is_on_sale(&self) -> bool {
        self.original_price > self.price
    }

    /// Discount off the original price, rounded to a whole percent.
    pub fn discount_percentage(&self) -> Option<u32> {
        if !self.is_on_sale() || self.original_price <= 0.0 {
            return None;
        }
        let savings = self.original_price - self.price;
        Some(((savings / self.original_price) * 100.0).round() as u32)
    }

    /// Look up a variant group by id.
    pub fn variant_group(&self, group_id: &str) -> Option<&VariantGroup> {
        self.variant_groups.iter().find(|g| g.id == group_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parse_is_case_insensitive() {
        assert_eq!("amazon".parse::<Source>().unwrap(), Source::Amazon);
        assert_eq!(" Indiamart ".parse::<Source>().unwrap(), Source::Indiamart);
        assert!(matches!(
            "ebay".parse::<Source>(),
            Err(CatalogError::UnknownSource(_))
        ));
    }

    #[test]
    fn test_discount_percentage() {
        let mut product = Product::new(1, "Atta", 240.0, 4.5, Source::Amazon, "Grocery");
        assert_eq!(product.discount_percentage(), None);

        product.original_price = 310.0;
        assert!(product.is_on_sale());
        assert_eq!(product.discount_percentage(), Some(23));
    }

    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let json = r#"{
            "id": 101,
            "title": "Red Brick",
            "price": 8,
            "originalPrice": 12,
            "rating": 4.1,
            "image": "https://example.com/brick.jpg",
            "source": "Indiamart",
            "category": "Construction Material",
            "url": "https://www.indiamart.com/proddetail/red-bricks",
            "description": "Standard size red clay bricks.",
            "isWholesale": true,
            "minOrderQty": 2000
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(101));
        assert!(product.is_wholesale);
        assert_eq!(product.min_order_qty, Some(2000));
        assert!(product.features.is_empty());
        assert!(!product.has_variants());
    }
}
