//! Behaviour of the visible-products pipeline over realistic catalogs.

use std::collections::BTreeSet;

use bazaar_catalog::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn two_products() -> Vec<Product> {
    vec![
        Product::new(1, "Wireless Mouse", 100.0, 4.5, Source::Amazon, "Electronics"),
        Product::new(2, "USB Cable", 50.0, 3.0, Source::Flipkart, "Electronics"),
    ]
}

fn ids(products: &[&Product]) -> Vec<u32> {
    products.iter().map(|p| p.id.get()).collect()
}

fn random_catalog(rng: &mut StdRng, count: u32) -> Vec<Product> {
    (0..count)
        .map(|i| {
            let source = Source::ALL[rng.gen_range(0..Source::ALL.len())];
            let price = f64::from(rng.gen_range(1..5_000u32));
            let rating = f64::from(rng.gen_range(0..=50u32)) / 10.0;
            Product::new(i + 1, format!("Item {}", i), price, rating, source, "Mixed")
        })
        .collect()
}

fn catalog() -> Catalog {
    let mut rng = StdRng::seed_from_u64(2024);
    let options = SeedOptions {
        retail_per_category: 30,
        wholesale_per_category: 10,
        ..SeedOptions::default()
    };
    Catalog::builtin(&options, &AffiliateConfig::default(), &mut rng).unwrap()
}

#[test]
fn source_rating_and_price_sort_scenario() {
    let retail = two_products();
    let filters = FilterState::new()
        .with_sources([Source::Amazon])
        .with_price_range(PriceRange::from_inputs("", ""))
        .with_min_rating(4.0)
        .with_sort(SortOption::PriceLow);

    let visible = select_visible_products(
        Page::Home,
        "All",
        "",
        &filters,
        &BTreeSet::new(),
        &retail,
        &[],
    );
    assert_eq!(ids(&visible), vec![1]);
}

#[test]
fn min_price_excludes_cheaper_product() {
    let retail = two_products();
    let filters = FilterState::new().with_price_range(PriceRange::new(Some(60.0), Some(200.0)));

    let visible = select_visible_products(
        Page::Home,
        "All",
        "",
        &filters,
        &BTreeSet::new(),
        &retail,
        &[],
    );
    assert_eq!(ids(&visible), vec![1]);
}

#[test]
fn price_bounds_hold_for_random_catalogs() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..50 {
        let retail = random_catalog(&mut rng, 60);
        let min = f64::from(rng.gen_range(0..2_500u32));
        let max = min + f64::from(rng.gen_range(0..2_500u32));
        let filters = FilterState::new().with_price_range(PriceRange::new(Some(min), Some(max)));

        let visible = select_visible_products(
            Page::Home,
            "All",
            "",
            &filters,
            &BTreeSet::new(),
            &retail,
            &[],
        );
        assert!(visible.iter().all(|p| p.price >= min && p.price <= max));
        let expected = retail.iter().filter(|p| p.price >= min && p.price <= max).count();
        assert_eq!(visible.len(), expected);
    }
}

#[test]
fn empty_source_set_keeps_everything() {
    let mut rng = StdRng::seed_from_u64(2);
    let retail = random_catalog(&mut rng, 100);
    let visible = select_visible_products(
        Page::Home,
        "All",
        "",
        &FilterState::default(),
        &BTreeSet::new(),
        &retail,
        &[],
    );
    assert_eq!(visible.len(), retail.len());
}

#[test]
fn sorts_are_monotonic_and_relevance_is_stable() {
    let mut rng = StdRng::seed_from_u64(3);
    let retail = random_catalog(&mut rng, 200);
    let run = |sort: SortOption| {
        select_visible_products(
            Page::Home,
            "All",
            "",
            &FilterState::new().with_sort(sort),
            &BTreeSet::new(),
            &retail,
            &[],
        )
    };

    let ascending = run(SortOption::PriceLow);
    assert!(ascending.windows(2).all(|w| w[0].price <= w[1].price));

    let descending = run(SortOption::PriceHigh);
    assert!(descending.windows(2).all(|w| w[0].price >= w[1].price));

    let by_rating = run(SortOption::Rating);
    assert!(by_rating.windows(2).all(|w| w[0].rating >= w[1].rating));
    // Equal ratings keep catalog order.
    assert!(by_rating
        .windows(2)
        .filter(|w| w[0].rating == w[1].rating)
        .all(|w| w[0].id < w[1].id));

    let relevance = run(SortOption::Relevance);
    let original: Vec<&Product> = retail.iter().collect();
    assert_eq!(relevance, original);
}

#[test]
fn wishlist_page_only_shows_wishlisted_products() {
    let catalog = catalog();
    let mut rng = StdRng::seed_from_u64(4);

    let empty = select_visible_products(
        Page::Wishlist,
        "All",
        "",
        &FilterState::default(),
        &BTreeSet::new(),
        catalog.retail(),
        catalog.wholesale(),
    );
    assert!(empty.is_empty());

    for _ in 0..20 {
        let mut wishlist = Wishlist::new();
        for _ in 0..rng.gen_range(0..15) {
            let product = if rng.gen_bool(0.7) {
                &catalog.retail()[rng.gen_range(0..catalog.retail().len())]
            } else {
                &catalog.wholesale()[rng.gen_range(0..catalog.wholesale().len())]
            };
            wishlist.toggle(product.id);
        }
        let set = wishlist.id_set();

        let visible = select_visible_products(
            Page::Wishlist,
            "Dairy & Bakery",
            "",
            &FilterState::default(),
            &set,
            catalog.retail(),
            catalog.wholesale(),
        );
        assert!(visible.iter().all(|p| set.contains(&p.id)));
        // Category is ignored on the wishlist page.
        assert_eq!(visible.len(), set.len());
    }
}

#[test]
fn wholesale_page_reads_wholesale_list() {
    let catalog = catalog();
    let query = CatalogQuery::new()
        .with_page(Page::Wholesale)
        .with_category("Packaging Material");

    let visible = query.run(&BTreeSet::new(), catalog.retail(), catalog.wholesale());
    assert_eq!(visible.len(), 10);
    assert!(visible
        .iter()
        .all(|p| p.is_wholesale && p.category == "Packaging Material"));
}

#[test]
fn search_and_category_combine() {
    let catalog = catalog();
    let query = CatalogQuery::new()
        .with_category("Dairy & Bakery")
        .with_search("milk");

    let visible = query.run(&BTreeSet::new(), catalog.retail(), catalog.wholesale());
    assert!(!visible.is_empty());
    assert!(visible
        .iter()
        .all(|p| p.category == "Dairy & Bakery" && p.title.to_lowercase().contains("milk")));
}

#[test]
fn pipeline_does_not_mutate_inputs() {
    let catalog = catalog();
    let before = catalog.clone();
    let filters = FilterState::new()
        .with_sort(SortOption::PriceHigh)
        .with_min_rating(4.0);

    let _ = select_visible_products(
        Page::Home,
        "All",
        "",
        &filters,
        &BTreeSet::new(),
        catalog.retail(),
        catalog.wholesale(),
    );
    assert_eq!(catalog, before);
}
