//! Catalog backed by the storefront HTTP API.
//!
//! Reads never fail: when the API cannot be reached, or answers with an
//! error, listings come from the last listing the API served (if one was
//! cached) or else the bundled sample catalog. Order submission has no
//! fallback; its errors go back to the caller.

use crate::client::FetchClient;
use crate::sample::sample_products;
use async_trait::async_trait;
use storefront_cache::{Cache, KeyValueStore, MemoryStore};
use storefront_commerce::catalog::{CatalogError, CatalogSource, Product, SubmitOrderResponse};
use storefront_commerce::checkout::Order;
use storefront_commerce::ProductId;
use tracing::{debug, error, instrument, warn};

/// Key the last successful listing is cached under.
pub const LISTING_CACHE_KEY: &str = "catalog:products";

const PRODUCTS_PATH: &str = "/api/products";
const CHECKOUT_PATH: &str = "/api/cart/checkout";

/// Catalog source talking to `{base}/api/...`.
pub struct HttpCatalog<S = MemoryStore> {
    client: FetchClient,
    listing: Cache<S>,
}

impl HttpCatalog<MemoryStore> {
    /// Catalog at `base_url` that remembers its last listing in memory.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_store(FetchClient::new(base_url), MemoryStore::new())
    }
}

impl<S: KeyValueStore> HttpCatalog<S> {
    /// Catalog using `client`, caching the last listing in `store`.
    pub fn with_store(client: FetchClient, store: S) -> Self {
        Self {
            client,
            listing: Cache::new(store),
        }
    }

    pub fn client(&self) -> &FetchClient {
        &self.client
    }

    /// Last listing the API served, if one is cached and readable.
    pub fn cached_listing(&self) -> Option<Vec<Product>> {
        match self.listing.get::<Vec<Product>>(LISTING_CACHE_KEY) {
            Ok(listing) => listing,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable cached listing");
                None
            }
        }
    }

    fn fallback_listing(&self) -> Vec<Product> {
        self.cached_listing().unwrap_or_else(|| {
            debug!("no cached listing, using sample catalog");
            sample_products()
        })
    }

    fn remember(&self, products: &[Product]) {
        if let Err(e) = self.listing.set(LISTING_CACHE_KEY, &products) {
            warn!(error = %e, "failed to cache product listing");
        }
    }
}

#[async_trait]
impl<S: KeyValueStore> CatalogSource for HttpCatalog<S> {
    #[instrument(skip(self), fields(base = %self.client.base_url()))]
    async fn list_products(&self) -> Vec<Product> {
        match self.client.get_json::<Vec<Product>>(PRODUCTS_PATH).await {
            Ok(products) => {
                debug!(count = products.len(), "fetched products");
                self.remember(&products);
                products
            }
            Err(e) => {
                warn!(error = %e, "error fetching products, using fallback listing");
                self.fallback_listing()
            }
        }
    }

    #[instrument(skip(self, id), fields(id = %id))]
    async fn get_product(&self, id: &ProductId) -> Option<Product> {
        let fetched = match self.client.url_with_segment(PRODUCTS_PATH, id.as_str()) {
            Ok(url) => self.client.get_json::<Option<Product>>(&url).await,
            Err(e) => Err(e),
        };
        match fetched {
            Ok(product) => product,
            Err(e) => {
                warn!(error = %e, "error fetching product, using fallback listing");
                self.fallback_listing().into_iter().find(|p| &p.id == id)
            }
        }
    }

    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    async fn submit_order(&self, order: &Order) -> Result<SubmitOrderResponse, CatalogError> {
        self.client
            .post_json(CHECKOUT_PATH, order)
            .await
            .map_err(|e| {
                error!(error = %e, "error submitting order");
                CatalogError::from(e)
            })
    }
}
