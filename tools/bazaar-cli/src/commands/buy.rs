//! Simulated purchase command.

use anyhow::Result;
use bazaar_catalog::checkout::{PurchaseFlow, PROCESSING_DELAY};
use bazaar_catalog::rewards::Rewards;
use console::style;

use super::BuyArgs;
use crate::context::Context;
use crate::output::format_price;

/// Run the buy command.
pub async fn run(args: BuyArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = catalog.get(args.id)?;
    let store = ctx.store()?;
    let mut rewards = Rewards::load(&store);

    let mut flow = PurchaseFlow::new();
    flow.begin(product)?;

    let spinner = ctx.output.spinner(&format!(
        "Processing {} on {}...",
        product.title, product.source
    ));
    if !args.no_wait {
        tokio::time::sleep(PROCESSING_DELAY).await;
    }
    let outcome = flow.complete(product, &mut rewards)?;
    spinner.finish_and_clear();

    rewards.save(&store)?;

    if ctx.output.is_json() {
        ctx.output.json(&outcome);
        flow.redirected();
        return Ok(());
    }

    ctx.output.kv("Product", &product.title);
    ctx.output.kv("Price", &format_price(product.price));
    if let Some(qty) = product.min_order_qty {
        ctx.output.kv("Min order", &format!("{} units", qty));
    }

    if let Some(reward) = outcome.reward {
        ctx.output.success(&format!(
            "Reward unlocked: {} coins (balance {})",
            style(format!("+{}", reward)).yellow().bold(),
            rewards.coins()
        ));
        if !args.no_wait {
            let wait = ctx.output.spinner("Taking you to the store...");
            tokio::time::sleep(outcome.redirect_after).await;
            wait.finish_and_clear();
        }
    }

    flow.redirected();
    ctx.output.debug(&format!("Purchase step: {}", flow.step().display_name()));
    ctx.output.success(&format!(
        "Continue on {}: {}",
        product.source,
        style(&outcome.redirect_url).cyan().underlined()
    ));

    Ok(())
}
