//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use bazaar_catalog::affiliate::AffiliateConfig;
use bazaar_catalog::catalog::SeedOptions;
use bazaar_imagegen::{GeminiClient, QueueConfig, RateLimitPolicy};
use serde::{Deserialize, Serialize};

/// Seed used when the config does not pin one, so `browse` and `show` agree
/// on generated listings between runs.
pub const DEFAULT_CATALOG_SEED: u64 = 2024;

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BazaarConfig {
    /// Catalog generation.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Affiliate tagging of outbound links.
    #[serde(default)]
    pub affiliate: AffiliateConfig,

    /// Local state storage.
    #[serde(default)]
    pub store: StoreConfig,

    /// Image generation.
    #[serde(default)]
    pub images: ImagesConfig,
}

impl BazaarConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }
}

/// Catalog generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Listings per retail category after expansion.
    #[serde(default = "default_retail_per_category")]
    pub retail_per_category: usize,

    /// Listings per wholesale category after expansion.
    #[serde(default = "default_wholesale_per_category")]
    pub wholesale_per_category: usize,

    /// RNG seed for generated listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// JSON file replacing the built-in base catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<String>,
}

fn default_retail_per_category() -> usize {
    200
}

fn default_wholesale_per_category() -> usize {
    50
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            retail_per_category: default_retail_per_category(),
            wholesale_per_category: default_wholesale_per_category(),
            seed: None,
            products: None,
        }
    }
}

impl CatalogConfig {
    pub fn seed_options(&self) -> SeedOptions {
        SeedOptions {
            retail_per_category: self.retail_per_category,
            wholesale_per_category: self.wholesale_per_category,
            ..SeedOptions::default()
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_CATALOG_SEED)
    }
}

/// Where wishlist and rewards are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_dir")]
    pub dir: String,
}

fn default_store_dir() -> String {
    ".bazaar".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
        }
    }
}

/// Image generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Gemini model name.
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Minimum gap between generation calls.
    #[serde(default = "default_throttle_secs")]
    pub throttle_secs: u64,

    /// Pause after a rate limit.
    #[serde(default = "default_pause_secs")]
    pub pause_secs: u64,

    /// Give up on a request after this many rate limits. Unbounded if unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rate_limit_retries: Option<u32>,

    /// Share one generation between concurrent requests for the same term.
    #[serde(default)]
    pub dedupe_in_flight: bool,
}

fn default_model() -> String {
    GeminiClient::DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    GeminiClient::DEFAULT_API_KEY_ENV.to_string()
}

fn default_throttle_secs() -> u64 {
    4
}

fn default_pause_secs() -> u64 {
    60
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key_env: default_api_key_env(),
            throttle_secs: default_throttle_secs(),
            pause_secs: default_pause_secs(),
            max_rate_limit_retries: None,
            dedupe_in_flight: false,
        }
    }
}

impl ImagesConfig {
    pub fn queue_config(&self) -> QueueConfig {
        let mut policy = RateLimitPolicy::new().with_pause(Duration::from_secs(self.pause_secs));
        if let Some(max) = self.max_rate_limit_retries {
            policy = policy.with_max_retries(max);
        }
        QueueConfig::new()
            .with_throttle(Duration::from_secs(self.throttle_secs))
            .with_rate_limit(policy)
            .with_dedupe(self.dedupe_in_flight)
    }
}

/// Generate a default bazaar.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Bazaar configuration

[catalog]
retail_per_category = 200
wholesale_per_category = 50
# seed = {seed}
# products = "my_catalog.json"

[affiliate]
amazon_tag = "{tag}"

[store]
dir = ".bazaar"

[images]
model = "{model}"
api_key_env = "{key_env}"
throttle_secs = 4
pause_secs = 60
# max_rate_limit_retries = 5
dedupe_in_flight = false
"#,
        seed = DEFAULT_CATALOG_SEED,
        tag = bazaar_catalog::affiliate::DEFAULT_AMAZON_TAG,
        model = GeminiClient::DEFAULT_MODEL,
        key_env = GeminiClient::DEFAULT_API_KEY_ENV,
    )
}
