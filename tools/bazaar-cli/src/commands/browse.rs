//! Product listing command.

use anyhow::Result;
use bazaar_catalog::search::{CatalogQuery, FilterState, Page, PagedResults, PriceRange};
use bazaar_catalog::wishlist::PersistentWishlist;
use console::style;
use serde_json::json;

use super::BrowseArgs;
use crate::context::Context;
use crate::output::{format_price, source_badge, truncate};

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    if args.categories {
        let names = catalog.categories(args.page == Page::Wholesale);
        if ctx.output.is_json() {
            ctx.output.json(&names);
        } else {
            ctx.output.header(&format!("Categories ({})", args.page));
            for name in names {
                ctx.output.list_item(name);
            }
        }
        return Ok(());
    }

    if !args.page.shows_products() {
        ctx.output
            .warn(&format!("The {} page has no product listing", args.page));
        return Ok(());
    }

    let wishlist = PersistentWishlist::load(ctx.store()?);
    let wishlisted = wishlist.wishlist().id_set();

    let filters = FilterState::new()
        .with_sources(args.sources.iter().copied())
        .with_price_range(PriceRange::from_inputs(&args.min_price, &args.max_price))
        .with_min_rating(args.min_rating)
        .with_sort(args.sort);
    let active = filters.active_count();

    let query = CatalogQuery::new()
        .with_page(args.page)
        .with_category(args.category)
        .with_search(args.search)
        .with_filters(filters);

    let visible = query.run(&wishlisted, catalog.retail(), catalog.wholesale());
    let results = PagedResults::paginate(visible, args.result_page, args.limit);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "query": query,
            "items": results.items,
            "pagination": results.pagination,
        }));
        return Ok(());
    }

    let p = &results.pagination;
    ctx.output.header(&format!(
        "{} · {} ({} products)",
        args.page, query.category, p.total
    ));
    if active > 0 {
        ctx.output.debug(&format!("{} filter(s) active", active));
    }

    if results.is_empty() {
        ctx.output.info("No products match.");
        return Ok(());
    }

    let widths = [7, 44, 10, 6, 10];
    ctx.output.table_row(&["ID", "TITLE", "PRICE", "RATING", "SOURCE"], &widths);
    for product in &results.items {
        let marker = if wishlisted.contains(&product.id) { "♥ " } else { "" };
        let title = format!("{}{}", marker, truncate(&product.title, 42));
        let id = product.id.to_string();
        let price = format_price(product.price);
        let rating = format!("{:.1}", product.rating);
        let source = source_badge(product.source);
        ctx.output
            .table_row(&[&id, &title, &price, &rating, &source], &widths);
    }

    println!();
    ctx.output.info(&format!(
        "Showing {}-{} of {} (page {}/{})",
        p.start_item(),
        p.end_item(),
        p.total,
        p.page,
        p.total_pages
    ));
    if p.has_next {
        ctx.output.debug(&format!(
            "Next: {}",
            style(format!("--result-page {}", p.page + 1)).cyan()
        ));
    }

    Ok(())
}
