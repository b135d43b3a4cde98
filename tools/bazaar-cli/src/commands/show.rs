//! Product detail command.

use anyhow::{Context as _, Result};
use bazaar_catalog::catalog::{VariantKind, VariantSelection};
use bazaar_catalog::wishlist::PersistentWishlist;
use console::style;
use serde_json::json;

use super::ShowArgs;
use crate::context::Context;
use crate::output::{format_price, source_badge};

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = catalog.get(args.id)?;

    let mut selection = VariantSelection::for_product(product);
    for (group, option) in &args.variants {
        selection
            .select(product, group, option)
            .with_context(|| format!("Cannot select variant for product {}", product.id))?;
    }
    let price = selection.current_price(product);
    let image = selection.current_image(product);

    let wishlisted = PersistentWishlist::load(ctx.store()?).contains(product.id);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product": product,
            "selection": selection,
            "currentPrice": price,
            "currentImage": image,
            "wishlisted": wishlisted,
        }));
        return Ok(());
    }

    ctx.output.header(&product.title);
    ctx.output.kv("ID", &product.id.to_string());
    let mut price_line = format_price(price);
    if let Some(discount) = product.discount_percentage() {
        price_line = format!(
            "{} {} {}",
            price_line,
            style(format_price(product.original_price)).dim().strikethrough(),
            style(format!("{}% off", discount)).green()
        );
    }
    ctx.output.kv("Price", &price_line);
    if let Some(qty) = product.min_order_qty {
        ctx.output.kv("Min order", &format!("{} units", qty));
    }
    ctx.output.kv("Rating", &format!("{:.1} ★", product.rating));
    ctx.output.kv("Source", &source_badge(product.source));
    ctx.output.kv("Category", &product.category);
    ctx.output.kv("Image", image);
    ctx.output.kv("Link", &product.url);
    if wishlisted {
        ctx.output.kv("Wishlist", &style("♥ saved").red().to_string());
    }

    if !product.description.is_empty() {
        println!();
        println!("  {}", product.description);
    }

    if !product.features.is_empty() {
        ctx.output.header("Features");
        for feature in &product.features {
            ctx.output.list_item(feature);
        }
    }

    for group in &product.variant_groups {
        ctx.output.header(&group.name);
        for option in group.options() {
            let chosen = selection.selected(&group.id) == Some(option.id.as_str());
            let mut line = match (group.kind, &option.color_code) {
                (VariantKind::Color, Some(code)) => format!("{} ({})", option.label, code),
                _ => option.label.clone(),
            };
            if let Some(price) = option.price {
                line = format!("{} · {}", line, format_price(price));
            }
            line = format!("{} [{}={}]", line, group.id, option.id);
            if chosen {
                ctx.output.list_item(&style(line).bold().green().to_string());
            } else {
                ctx.output.list_item(&line);
            }
        }
    }

    Ok(())
}
