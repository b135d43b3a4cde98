//! Bazaar CLI - Browse the catalog, manage a wishlist and earn coins.
//!
//! Commands:
//! - `bazaar browse` - List products with search, filters and sorting
//! - `bazaar show` - Show one product, optionally with variants selected
//! - `bazaar wishlist` - List, toggle or clear saved products
//! - `bazaar buy` - Simulate a purchase and print the marketplace link
//! - `bazaar rewards` - Check coins, spin the daily wheel, redeem rewards
//! - `bazaar image` - Generate product images
//! - `bazaar config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    BrowseArgs, BuyArgs, ConfigArgs, ImageArgs, RewardsArgs, ShowArgs, WishlistArgs,
};

/// Bazaar - Multi-marketplace shopping from the terminal
#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Browse(BrowseArgs),

    /// Show product details
    Show(ShowArgs),

    /// Manage the wishlist
    Wishlist(WishlistArgs),

    /// Buy a product through its marketplace
    Buy(BuyArgs),

    /// Coins, daily spin and redeemable rewards
    Rewards(RewardsArgs),

    /// Generate product images
    Image(ImageArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Wishlist(args) => commands::wishlist::run(args, &ctx).await,
        Commands::Buy(args) => commands::buy::run(args, &ctx).await,
        Commands::Rewards(args) => commands::rewards::run(args, &ctx).await,
        Commands::Image(args) => commands::image::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_browse_filters() {
        let cli = Cli::try_parse_from([
            "bazaar", "browse", "--source", "amazon", "--source", "Meesho", "--sort",
            "price_low", "--max-price", "500",
        ])
        .unwrap();
        let Commands::Browse(args) = cli.command else {
            panic!("expected browse");
        };
        assert_eq!(args.sources.len(), 2);
        assert_eq!(args.sort, bazaar_catalog::search::SortOption::PriceLow);
        assert_eq!(args.max_price, "500");
        assert_eq!(args.category, "All");
    }
}
