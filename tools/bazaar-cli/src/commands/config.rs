//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};
use serde_json::json;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, BazaarConfig};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let catalog = &ctx.config.catalog;
    ctx.output.info("[catalog]");
    ctx.output.kv("retail_per_category", &catalog.retail_per_category.to_string());
    ctx.output.kv("wholesale_per_category", &catalog.wholesale_per_category.to_string());
    ctx.output.kv("seed", &catalog.seed().to_string());
    if let Some(ref products) = catalog.products {
        ctx.output.kv("products", products);
    }

    ctx.output.info("[affiliate]");
    ctx.output.kv("amazon_tag", &ctx.config.affiliate.amazon_tag);

    ctx.output.info("[store]");
    ctx.output.kv("dir", &ctx.config.store.dir);

    let images = &ctx.config.images;
    ctx.output.info("[images]");
    ctx.output.kv("model", &images.model);
    ctx.output.kv("api_key_env", &images.api_key_env);
    ctx.output.kv("throttle_secs", &images.throttle_secs.to_string());
    ctx.output.kv("pause_secs", &images.pause_secs.to_string());
    ctx.output.kv(
        "max_rate_limit_retries",
        &images
            .max_rate_limit_retries
            .map(|n| n.to_string())
            .unwrap_or_else(|| "unbounded".to_string()),
    );
    ctx.output.kv("dedupe_in_flight", &images.dedupe_in_flight.to_string());

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(path) = ctx.config_path.as_ref().and_then(|p| p.to_str()) else {
        bail!("No config file found. Run `bazaar config init` to create one.");
    };

    let mut config = BazaarConfig::load(path)?;
    set_config_value(&mut config, key, value)?;
    config.save(path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path: PathBuf = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if ctx.config.catalog.retail_per_category == 0 {
        warnings.push("catalog.retail_per_category is 0; only base products are listed".to_string());
    }

    if let Some(ref products) = ctx.config.catalog.products {
        if !ctx.resolve_path(products).exists() {
            errors.push(format!("catalog.products '{}' does not exist", products));
        }
    }

    if ctx.config.affiliate.amazon_tag.trim().is_empty() {
        errors.push("affiliate.amazon_tag must not be empty".to_string());
    }

    if ctx.config.store.dir.trim().is_empty() {
        errors.push("store.dir must not be empty".to_string());
    }

    let images = &ctx.config.images;
    if images.throttle_secs == 0 {
        warnings.push("images.throttle_secs is 0; the provider may rate limit quickly".to_string());
    }
    if images.pause_secs == 0 {
        warnings.push("images.pause_secs is 0; rate limits are retried immediately".to_string());
    }
    if std::env::var(&images.api_key_env).map_or(true, |v| v.trim().is_empty()) {
        warnings.push(format!(
            "images.api_key_env '{}' is not set; `bazaar image` will fail",
            images.api_key_env
        ));
    }

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn get_config_value(config: &BazaarConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["catalog", "retail_per_category"] => Ok(config.catalog.retail_per_category.to_string()),
        ["catalog", "wholesale_per_category"] => {
            Ok(config.catalog.wholesale_per_category.to_string())
        }
        ["catalog", "seed"] => Ok(config.catalog.seed().to_string()),
        ["catalog", "products"] => Ok(config
            .catalog
            .products
            .clone()
            .unwrap_or_else(|| "null".to_string())),
        ["affiliate", "amazon_tag"] => Ok(config.affiliate.amazon_tag.clone()),
        ["store", "dir"] => Ok(config.store.dir.clone()),
        ["images", "model"] => Ok(config.images.model.clone()),
        ["images", "api_key_env"] => Ok(config.images.api_key_env.clone()),
        ["images", "throttle_secs"] => Ok(config.images.throttle_secs.to_string()),
        ["images", "pause_secs"] => Ok(config.images.pause_secs.to_string()),
        ["images", "max_rate_limit_retries"] => Ok(config
            .images
            .max_rate_limit_retries
            .map(|n| n.to_string())
            .unwrap_or_else(|| "null".to_string())),
        ["images", "dedupe_in_flight"] => Ok(config.images.dedupe_in_flight.to_string()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut BazaarConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["catalog", "retail_per_category"] => config.catalog.retail_per_category = value.parse()?,
        ["catalog", "wholesale_per_category"] => {
            config.catalog.wholesale_per_category = value.parse()?
        }
        ["catalog", "seed"] => config.catalog.seed = Some(value.parse()?),
        ["catalog", "products"] => config.catalog.products = Some(value.to_string()),
        ["affiliate", "amazon_tag"] => config.affiliate.amazon_tag = value.to_string(),
        ["store", "dir"] => config.store.dir = value.to_string(),
        ["images", "model"] => config.images.model = value.to_string(),
        ["images", "api_key_env"] => config.images.api_key_env = value.to_string(),
        ["images", "throttle_secs"] => config.images.throttle_secs = value.parse()?,
        ["images", "pause_secs"] => config.images.pause_secs = value.parse()?,
        ["images", "max_rate_limit_retries"] => {
            config.images.max_rate_limit_retries = Some(value.parse()?)
        }
        ["images", "dedupe_in_flight"] => config.images.dedupe_in_flight = value.parse()?,
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}
