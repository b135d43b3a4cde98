//! Mock catalog expansion.
//!
//! The demo catalog is a handful of hand-written base listings per category,
//! padded out to a fixed number of listings per category with price-scaled
//! variations of those bases.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::affiliate::AffiliateConfig;
use crate::catalog::{Product, Source};
use crate::ids::ProductId;

/// Title suffix and price multiplier applied to a generated listing.
struct Variation {
    suffix: &'static str,
    price_mult: f64,
}

const VARIATIONS: [Variation; 5] = [
    Variation { suffix: " - Family Pack", price_mult: 1.5 },
    Variation { suffix: " (Premium)", price_mult: 1.2 },
    Variation { suffix: " - Small", price_mult: 0.8 },
    Variation { suffix: " - Large", price_mult: 1.3 },
    Variation { suffix: " (New Arrival)", price_mult: 1.1 },
];

/// Expand `base` to `target_per_category` listings per category.
///
/// Categories are processed in the order they first appear in `base`. Each
/// category starts with its base listings (URLs affiliate-decorated), then
/// cycles through them adding variations until the target is reached.
/// Generated listings get ids `id_base + <position in output>`; wholesale
/// bases keep the Indiamart source, retail ones get a random retail source.
pub fn extend_products<R: Rng + ?Sized>(
    base: &[Product],
    target_per_category: usize,
    id_base: u32,
    affiliate: &AffiliateConfig,
    rng: &mut R,
) -> Vec<Product> {
    let mut categories: Vec<(&str, Vec<&Product>)> = Vec::new();
    for product in base {
        match categories.iter().position(|(name, _)| *name == product.category) {
            Some(idx) => categories[idx].1.push(product),
            None => categories.push((product.category.as_str(), vec![product])),
        }
    }

    let mut extended = Vec::with_capacity(categories.len() * target_per_category);

    for (_, category_base) in &categories {
        let mut created = 0;

        for product in category_base {
            let mut product = (*product).clone();
            product.url = affiliate.decorate(&product.url, product.source);
            extended.push(product);
            created += 1;
        }

        let mut i = 0;
        while created < target_per_category {
            let template = category_base[i % category_base.len()];
            let variation = &VARIATIONS[created % VARIATIONS.len()];
            let source = if template.is_wholesale {
                Source::Indiamart
            } else {
                *Source::RETAIL.choose(rng).unwrap_or(&template.source)
            };

            let mut product = template.clone();
            product.id = ProductId::new(id_base + extended.len() as u32);
            product.title = format!("{}{}", template.title, variation.suffix);
            product.price = (template.price * variation.price_mult).floor();
            product.original_price = (template.original_price * variation.price_mult).floor();
            product.source = source;
            product.url = affiliate.decorate(&template.url, source);
            extended.push(product);

            created += 1;
            i += 1;
        }
    }

    tracing::debug!(
        base = base.len(),
        categories = categories.len(),
        generated = extended.len(),
        "extended catalog"
    );
    extended
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn base() -> Vec<Product> {
        let mut atta = Product::new(1, "Atta", 100.0, 4.5, Source::Amazon, "Grocery");
        atta.original_price = 120.0;
        atta.url = "https://www.amazon.in/s?k=atta".to_string();
        let oil = Product::new(2, "Oil", 50.0, 4.0, Source::Flipkart, "Grocery");
        let kurta = Product::new(3, "Kurta", 700.0, 3.9, Source::Meesho, "Fashion");
        vec![atta, oil, kurta]
    }

    #[test]
    fn test_fills_each_category_to_target() {
        let mut rng = StdRng::seed_from_u64(7);
        let products = extend_products(&base(), 12, 10_000, &AffiliateConfig::default(), &mut rng);

        assert_eq!(products.len(), 24);
        assert_eq!(products.iter().filter(|p| p.category == "Grocery").count(), 12);
        assert_eq!(products.iter().filter(|p| p.category == "Fashion").count(), 12);
        // Category order follows first appearance.
        assert_eq!(products[0].category, "Grocery");
        assert_eq!(products[12].category, "Fashion");
    }

    #[test]
    fn test_ids_unique_and_based() {
        let mut rng = StdRng::seed_from_u64(1);
        let products = extend_products(&base(), 10, 10_000, &AffiliateConfig::default(), &mut rng);

        let ids: HashSet<_> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), products.len());
        assert_eq!(products[2].id, ProductId::new(10_002));
    }

    #[test]
    fn test_variation_pricing_and_titles() {
        let mut rng = StdRng::seed_from_u64(3);
        let products = extend_products(&base(), 4, 10_000, &AffiliateConfig::default(), &mut rng);

        // Grocery: two bases then variations at created = 2 and 3.
        assert_eq!(products[2].title, "Atta - Small");
        assert_eq!(products[2].price, 80.0);
        assert_eq!(products[2].original_price, 96.0);
        assert_eq!(products[3].title, "Oil - Large");
        assert_eq!(products[3].price, 65.0);
    }

    #[test]
    fn test_base_urls_are_tagged() {
        let mut rng = StdRng::seed_from_u64(3);
        let products = extend_products(&base(), 2, 10_000, &AffiliateConfig::default(), &mut rng);
        assert!(products[0].url.contains("tag=atozhomedel0b-21"));
    }

    #[test]
    fn test_wholesale_stays_indiamart() {
        let mut bricks = Product::new(101, "Bricks", 8.0, 4.1, Source::Indiamart, "Construction");
        bricks.is_wholesale = true;
        bricks.min_order_qty = Some(2000);

        let mut rng = StdRng::seed_from_u64(9);
        let products = extend_products(&[bricks], 6, 20_000, &AffiliateConfig::default(), &mut rng);

        assert_eq!(products.len(), 6);
        assert!(products.iter().all(|p| p.source == Source::Indiamart && p.is_wholesale));
    }

    #[test]
    fn test_target_below_base_keeps_bases() {
        let mut rng = StdRng::seed_from_u64(0);
        let products = extend_products(&base(), 1, 10_000, &AffiliateConfig::default(), &mut rng);
        assert_eq!(products.len(), 3);
    }
}
