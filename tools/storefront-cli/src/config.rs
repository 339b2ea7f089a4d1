//! CLI configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::cart::DEFAULT_CART_KEY;
use storefront_commerce::checkout::{CheckoutTimings, DEFAULT_PAYMENT_METHOD};
use storefront_data::CatalogConfig;

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorefrontConfig {
    /// Where products come from.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Where the cart is kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Checkout behavior.
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Find the nearest config file, starting at `start` and walking up.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        start.ancestors().find_map(|dir| {
            CONFIG_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|path| path.is_file())
        })
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Cart storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for the cart and cached listings, relative to the config
    /// file's directory.
    pub dir: PathBuf,

    /// Key the cart record is stored under.
    pub cart_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".storefront"),
            cart_key: DEFAULT_CART_KEY.to_string(),
        }
    }
}

/// Checkout settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Delay before the loading indicator is hidden.
    pub loading_hide_delay_ms: u64,

    /// Delay before the confirmation is shown.
    pub confirmation_delay_ms: u64,

    /// Payment method recorded on orders.
    pub payment_method: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        let timings = CheckoutTimings::default();
        Self {
            loading_hide_delay_ms: timings.loading_hide_delay.as_millis() as u64,
            confirmation_delay_ms: timings.confirmation_delay.as_millis() as u64,
            payment_method: DEFAULT_PAYMENT_METHOD.to_string(),
        }
    }
}

impl CheckoutConfig {
    pub fn timings(&self) -> CheckoutTimings {
        CheckoutTimings {
            loading_hide_delay: Duration::from_millis(self.loading_hide_delay_ms),
            confirmation_delay: Duration::from_millis(self.confirmation_delay_ms),
        }
    }
}
