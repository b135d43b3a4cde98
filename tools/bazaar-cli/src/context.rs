//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use bazaar_catalog::catalog::{BaseCatalog, Catalog};
use bazaar_store::Store;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::BazaarConfig;
use crate::output::Output;

/// Config file names, in lookup order.
pub const CONFIG_NAMES: [&str; 3] = ["bazaar.toml", ".bazaar.toml", "bazaar.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: BazaarConfig,
    /// File the config was read from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (BazaarConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (BazaarConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(BazaarConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match BazaarConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config, config_path)),
                        Err(e) => {
                            tracing::warn!(path = %config_path.display(), error = %e, "skipping unreadable config")
                        }
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Open the state store.
    pub fn store(&self) -> Result<Store> {
        let dir = self.resolve_path(&self.config.store.dir);
        Store::open_dir(&dir)
            .with_context(|| format!("Failed to open store at {}", dir.display()))
    }

    /// Build the product catalog.
    ///
    /// Generation is seeded, so product ids and listings are stable between
    /// invocations with the same config.
    pub fn catalog(&self) -> Result<Catalog> {
        let base = match &self.config.catalog.products {
            Some(path) => {
                let path = self.resolve_path(path);
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read products file: {}", path.display()))?;
                BaseCatalog::from_json(&json)
                    .with_context(|| format!("Failed to parse products file: {}", path.display()))?
            }
            None => BaseCatalog::builtin().context("Failed to load built-in catalog")?,
        };

        let mut rng = StdRng::seed_from_u64(self.config.catalog.seed());
        Ok(Catalog::generate(
            &base,
            &self.config.catalog.seed_options(),
            &self.config.affiliate,
            &mut rng,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join(".bazaar.toml"),
            "[store]\ndir = \"state\"\n",
        )
        .unwrap();

        let (config, path) = Context::find_config(&nested).unwrap();
        assert_eq!(config.store.dir, "state");
        assert_eq!(path, dir.path().join(".bazaar.toml"));
    }

    #[test]
    fn test_catalog_is_stable_for_a_seed() {
        let ctx = Context {
            config: BazaarConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: std::env::temp_dir(),
        };
        let first = ctx.catalog().unwrap();
        let second = ctx.catalog().unwrap();
        assert_eq!(first, second);
        assert!(!first.retail().is_empty());
    }
}
