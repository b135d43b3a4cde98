//! CLI command implementations.

pub mod browse;
pub mod buy;
pub mod config;
pub mod image;
pub mod rewards;
pub mod show;
pub mod wishlist;

use bazaar_catalog::catalog::Source;
use bazaar_catalog::search::{Page, SortOption};
use bazaar_catalog::ProductId;
use clap::{Args, Subcommand};

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Page to browse (home, wholesale, wishlist).
    #[arg(short, long, default_value = "home")]
    pub page: Page,

    /// Category name, or "All".
    #[arg(long, default_value = "All")]
    pub category: String,

    /// Case-insensitive text searched for in product titles.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Only show these marketplaces (repeatable).
    #[arg(long = "source")]
    pub sources: Vec<Source>,

    /// Minimum price. Blank or non-numeric means no bound.
    #[arg(long, default_value = "")]
    pub min_price: String,

    /// Maximum price. Blank or non-numeric means no bound.
    #[arg(long, default_value = "")]
    pub max_price: String,

    /// Minimum rating (0 to 5).
    #[arg(long, default_value_t = 0.0)]
    pub min_rating: f64,

    /// Sort order (relevance, price_low, price_high, rating).
    #[arg(long, default_value = "relevance")]
    pub sort: SortOption,

    /// Results per page.
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,

    /// Result page number, starting at 1.
    #[arg(long, default_value_t = 1)]
    pub result_page: usize,

    /// List the categories of the chosen page instead of products.
    #[arg(long)]
    pub categories: bool,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product ID.
    pub id: ProductId,

    /// Select a variant option, as group=option (repeatable).
    #[arg(long = "variant", value_parser = parse_variant)]
    pub variants: Vec<(String, String)>,
}

fn parse_variant(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((group, option)) if !group.trim().is_empty() && !option.trim().is_empty() => {
            Ok((group.trim().to_string(), option.trim().to_string()))
        }
        _ => Err(format!("expected group=option, got '{}'", raw)),
    }
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: Option<WishlistCommand>,
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// List wishlisted products.
    List,
    /// Add a product, or remove it if already saved.
    Toggle {
        /// Product ID.
        id: ProductId,
    },
    /// Remove every product.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the buy command.
#[derive(Args)]
pub struct BuyArgs {
    /// Product ID.
    pub id: ProductId,

    /// Skip the processing and reward delays.
    #[arg(long)]
    pub no_wait: bool,
}

/// Arguments for the rewards command.
#[derive(Args)]
pub struct RewardsArgs {
    #[command(subcommand)]
    pub command: Option<RewardsCommand>,
}

#[derive(Subcommand)]
pub enum RewardsCommand {
    /// Show coins, spins left and redeem options.
    Status,
    /// Spin the daily wheel.
    Spin {
        /// Skip the wheel animation.
        #[arg(long)]
        no_wait: bool,
    },
    /// Exchange coins for a reward.
    Redeem {
        /// Reward ID (e.g., amazon-500).
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the image command.
#[derive(Args)]
pub struct ImageArgs {
    /// Product names to generate images for.
    #[arg(required = true)]
    pub terms: Vec<String>,

    /// Image used when generation fails.
    #[arg(long, default_value = "https://placehold.co/400x400?text=No+Image")]
    pub fallback: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
