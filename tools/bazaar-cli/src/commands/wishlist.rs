//! Wishlist commands.

use anyhow::Result;
use bazaar_catalog::search::{select_visible_products, FilterState, Page};
use bazaar_catalog::wishlist::PersistentWishlist;
use dialoguer::Confirm;
use serde_json::json;

use super::{WishlistArgs, WishlistCommand};
use crate::context::Context;
use crate::output::{format_price, source_badge, truncate};

/// Run the wishlist command.
pub async fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    let mut wishlist = PersistentWishlist::load(ctx.store()?);

    match args.command.unwrap_or(WishlistCommand::List) {
        WishlistCommand::List => list(&wishlist, ctx),
        WishlistCommand::Toggle { id } => {
            let catalog = ctx.catalog()?;
            let product = catalog.get(id)?;
            let added = wishlist.toggle(product.id)?;

            if ctx.output.is_json() {
                ctx.output.json(&json!({ "id": product.id, "wishlisted": added }));
            } else if added {
                ctx.output.success(&format!("Saved {} to your wishlist", product.title));
            } else {
                ctx.output.success(&format!("Removed {} from your wishlist", product.title));
            }
            Ok(())
        }
        WishlistCommand::Clear { yes } => {
            if wishlist.wishlist().is_empty() {
                ctx.output.info("Wishlist is already empty");
                return Ok(());
            }

            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Remove all {} saved products?",
                        wishlist.wishlist().len()
                    ))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    ctx.output.info("Clear cancelled");
                    return Ok(());
                }
            }

            wishlist.clear()?;
            if ctx.output.is_json() {
                ctx.output.json(&json!({ "cleared": true }));
            } else {
                ctx.output.success("Wishlist cleared");
            }
            Ok(())
        }
    }
}

fn list(wishlist: &PersistentWishlist, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let ids = wishlist.wishlist().id_set();
    let products = select_visible_products(
        Page::Wishlist,
        "",
        "",
        &FilterState::new(),
        &ids,
        catalog.retail(),
        catalog.wholesale(),
    );

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("Wishlist ({})", products.len()));
    if products.is_empty() {
        ctx.output
            .info("Nothing saved yet. Use `bazaar wishlist toggle <id>` to add a product.");
        return Ok(());
    }

    for product in products {
        ctx.output.list_item(&format!(
            "{:>6}  {}  {}  {}",
            product.id,
            truncate(&product.title, 40),
            format_price(product.price),
            source_badge(product.source)
        ));
    }

    Ok(())
}
