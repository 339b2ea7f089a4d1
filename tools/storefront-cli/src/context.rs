//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use storefront_cache::FileStore;
use storefront_commerce::cart::CartStore;
use storefront_commerce::catalog::CatalogSource;

use crate::config::StorefrontConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: StorefrontConfig,
    /// Output handler.
    pub output: Output,
    /// Directory relative storage paths resolve against: the config file's
    /// directory, or the working directory when there is none.
    pub root: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let path = match config_path {
            Some(path) => Some(resolve(&cwd, Path::new(path))),
            None => StorefrontConfig::discover(&cwd),
        };

        let (config, root) = match path {
            Some(path) => {
                output.debug(&format!("Using config {}", path.display()));
                let config = StorefrontConfig::load(&path)?;
                let root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                (config, root)
            }
            None => (StorefrontConfig::default(), cwd),
        };

        Ok(Self {
            config,
            output,
            root,
        })
    }

    /// Storage directory for the cart and cached listings.
    pub fn storage_dir(&self) -> PathBuf {
        resolve(&self.root, &self.config.storage.dir)
    }

    /// Open the file-backed store.
    pub fn store(&self) -> Result<Arc<FileStore>> {
        let dir = self.storage_dir();
        let store = FileStore::open(&dir)
            .with_context(|| format!("Failed to open storage at {}", dir.display()))?;
        Ok(Arc::new(store))
    }

    /// Load the persisted cart.
    pub fn cart(&self) -> Result<CartStore<Arc<FileStore>>> {
        Ok(CartStore::load_with_key(
            self.store()?,
            self.config.storage.cart_key.clone(),
        ))
    }

    /// Open the configured catalog source.
    pub fn catalog(&self) -> Result<Arc<dyn CatalogSource>> {
        if self.config.catalog.mock_mode {
            self.output.debug("Using the sample catalog");
        } else {
            self.output
                .debug(&format!("Using catalog API at {}", self.config.catalog.base_url));
        }
        Ok(self.config.catalog.open(self.store()?))
    }
}

/// Resolve a path relative to `base`.
fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
