//! Catalog source settings.

use crate::client::FetchClient;
use crate::http::HttpCatalog;
use crate::sample::SampleCatalog;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use storefront_cache::KeyValueStore;
use storefront_commerce::catalog::CatalogSource;

/// Where products come from and how slow the sample catalog pretends to be.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Root of the storefront API.
    pub base_url: String,
    /// Serve the bundled sample catalog instead of calling the API.
    pub mock_mode: bool,
    /// Simulated read latency of the sample catalog.
    pub read_latency_ms: u64,
    /// Simulated submit latency of the sample catalog.
    pub submit_latency_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.example.com".to_string(),
            mock_mode: true,
            read_latency_ms: 300,
            submit_latency_ms: 1000,
        }
    }
}

impl CatalogConfig {
    pub fn read_latency(&self) -> Duration {
        Duration::from_millis(self.read_latency_ms)
    }

    pub fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }

    /// Build the configured catalog source. `store` holds the HTTP catalog's
    /// cached listing and is unused in mock mode.
    pub fn open<S: KeyValueStore + 'static>(&self, store: S) -> Arc<dyn CatalogSource> {
        if self.mock_mode {
            Arc::new(SampleCatalog::with_latency(
                self.read_latency(),
                self.submit_latency(),
            ))
        } else {
            Arc::new(HttpCatalog::with_store(
                FetchClient::new(&self.base_url),
                store,
            ))
        }
    }
}
