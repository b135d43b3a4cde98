//! Coins, daily spin and redeem commands.

use anyhow::{bail, Result};
use bazaar_catalog::rewards::{redeem_option, Rewards, REDEEM_OPTIONS, SEGMENTS, SPIN_DURATION};
use bazaar_store::Store;
use chrono::Local;
use console::style;
use dialoguer::Confirm;
use serde_json::json;

use super::{RewardsArgs, RewardsCommand};
use crate::context::Context;
use crate::output::meter;

/// Run the rewards command.
pub async fn run(args: RewardsArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let mut rewards = Rewards::load(&store);

    match args.command.unwrap_or(RewardsCommand::Status) {
        RewardsCommand::Status => status(&rewards, ctx),
        RewardsCommand::Spin { no_wait } => spin(&mut rewards, &store, no_wait, ctx).await,
        RewardsCommand::Redeem { id, yes } => redeem(&mut rewards, &store, &id, yes, ctx),
    }
}

fn status(rewards: &Rewards, ctx: &Context) -> Result<()> {
    let today = Local::now().date_naive();
    let progress = rewards.progress();
    let spins_left = rewards.wheel.spins_left(today);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "coins": rewards.coins(),
            "spinsLeft": spins_left,
            "progress": progress,
            "options": REDEEM_OPTIONS,
        }));
        return Ok(());
    }

    ctx.output.header("Rewards");
    ctx.output.kv("Coins", &style(rewards.coins()).yellow().bold().to_string());
    ctx.output.kv("Spins left today", &spins_left.to_string());
    if progress.is_complete() {
        ctx.output.kv("Next voucher", &style("ready to redeem").green().to_string());
    } else {
        ctx.output.kv(
            "Next voucher",
            &format!(
                "{} {:.1}% ({} coins to go)",
                meter(progress.percent, 20),
                progress.percent,
                progress.needed
            ),
        );
    }

    ctx.output.header("Redeem");
    for option in &REDEEM_OPTIONS {
        let line = format!("{:<14} {:<24} {:>7} coins", option.id, option.title, option.cost);
        if rewards.wallet.can_afford(option.cost) {
            ctx.output.list_item(&style(line).green().to_string());
        } else {
            ctx.output.list_item(&style(line).dim().to_string());
        }
    }

    Ok(())
}

async fn spin(rewards: &mut Rewards, store: &Store, no_wait: bool, ctx: &Context) -> Result<()> {
    let today = Local::now().date_naive();
    let outcome = rewards.spin(today, &mut rand::thread_rng())?;
    rewards.save(store)?;

    if !no_wait {
        let spinner = ctx.output.spinner("Spinning the wheel...");
        tokio::time::sleep(SPIN_DURATION).await;
        spinner.finish_and_clear();
    }

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "outcome": outcome,
            "coins": rewards.coins(),
            "spinsLeft": rewards.wheel.spins_left(today),
        }));
        return Ok(());
    }

    ctx.output.debug(&format!(
        "Segment {} of {}, {} extra turns, rotation {:.1}°",
        outcome.segment + 1,
        SEGMENTS.len(),
        outcome.extra_turns,
        outcome.rotation
    ));
    if outcome.prize > 0 {
        ctx.output.success(&format!(
            "You won {} coins! Balance: {}",
            style(outcome.prize).yellow().bold(),
            rewards.coins()
        ));
    } else {
        ctx.output.info("No luck this time.");
    }
    ctx.output.kv("Spins left today", &rewards.wheel.spins_left(today).to_string());

    Ok(())
}

fn redeem(rewards: &mut Rewards, store: &Store, id: &str, yes: bool, ctx: &Context) -> Result<()> {
    let Some(option) = redeem_option(id) else {
        let known: Vec<&str> = REDEEM_OPTIONS.iter().map(|o| o.id).collect();
        bail!("Unknown reward '{}'. Available: {}", id, known.join(", "));
    };

    if !yes && !ctx.output.is_json() && rewards.wallet.can_afford(option.cost) {
        let confirmed = Confirm::new()
            .with_prompt(format!("Spend {} coins on {}?", option.cost, option.title))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Redeem cancelled");
            return Ok(());
        }
    }

    rewards.redeem(id)?;
    rewards.save(store)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "redeemed": option, "coins": rewards.coins() }));
    } else {
        ctx.output.success(&format!(
            "Redeemed {}. Remaining balance: {} coins",
            option.title,
            rewards.coins()
        ));
    }

    Ok(())
}
