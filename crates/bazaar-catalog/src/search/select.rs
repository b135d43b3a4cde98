//! The visible-products pipeline.

use std::collections::BTreeSet;

use crate::catalog::{category, Product};
use crate::ids::ProductId;
use crate::search::{FilterState, Page};

/// Compute the products to display.
///
/// The page picks the input list: retail for [`Page::Home`], wholesale for
/// [`Page::Wholesale`], both lists restricted to `wishlist` for
/// [`Page::Wishlist`], nothing for pages without products. Every product must
/// then match the search text (case-insensitive title substring), the
/// category (skipped on the wishlist page and for [`category::ALL`]), the
/// source set, the inclusive price range and the rating threshold. The result
/// is stably sorted by `filters.sort_by`; inputs are never modified.
pub fn select_visible_products<'a>(
    page: Page,
    category: &str,
    search: &str,
    filters: &FilterState,
    wishlist: &BTreeSet<ProductId>,
    retail: &'a [Product],
    wholesale: &'a [Product],
) -> Vec<&'a Product> {
    let candidates: Vec<&Product> = match page {
        Page::Home => retail.iter().collect(),
        Page::Wholesale => wholesale.iter().collect(),
        Page::Wishlist => retail
            .iter()
            .chain(wholesale.iter())
            .filter(|p| wishlist.contains(&p.id))
            .collect(),
        Page::Orders | Page::Rewards | Page::Game => Vec::new(),
    };

    let needle = search.to_lowercase();
    let check_category = page != Page::Wishlist && !category::is_all(category);

    let mut visible: Vec<&Product> = candidates
        .into_iter()
        .filter(|p| needle.is_empty() || p.title.to_lowercase().contains(&needle))
        .filter(|p| !check_category || p.category == category)
        .filter(|p| filters.allows_source(p.source))
        .filter(|p| filters.price_range.contains(p.price))
        .filter(|p| p.rating >= filters.min_rating)
        .collect();

    // `sort_by` is stable, so equal keys keep catalog order.
    visible.sort_by(|a, b| filters.sort_by.compare(a, b));

    tracing::trace!(
        page = %page,
        category,
        search,
        visible = visible.len(),
        "selected visible products"
    );
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Source;
    use crate::search::SortOption;

    fn retail() -> Vec<Product> {
        vec![
            Product::new(1, "Basmati Rice", 450.0, 4.6, Source::Amazon, "Grocery"),
            Product::new(2, "Rice Cooker", 1800.0, 4.1, Source::Flipkart, "Appliances"),
            Product::new(3, "Brown Rice", 300.0, 3.8, Source::Meesho, "Grocery"),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let retail = retail();
        let result = select_visible_products(
            Page::Home,
            "All",
            "RICE",
            &FilterState::default(),
            &BTreeSet::new(),
            &retail,
            &[],
        );
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_category_filter() {
        let retail = retail();
        let result = select_visible_products(
            Page::Home,
            "Grocery",
            "",
            &FilterState::default(),
            &BTreeSet::new(),
            &retail,
            &[],
        );
        let ids: Vec<u32> = result.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_rating_threshold_and_sort() {
        let retail = retail();
        let filters = FilterState::new()
            .with_min_rating(4.0)
            .with_sort(SortOption::PriceHigh);
        let result = select_visible_products(
            Page::Home,
            "All",
            "",
            &filters,
            &BTreeSet::new(),
            &retail,
            &[],
        );
        let ids: Vec<u32> = result.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_pages_without_products() {
        let retail = retail();
        for page in [Page::Orders, Page::Rewards, Page::Game] {
            let result = select_visible_products(
                page,
                "All",
                "",
                &FilterState::default(),
                &BTreeSet::new(),
                &retail,
                &retail,
            );
            assert!(result.is_empty());
        }
    }
}
