//! Persisted cart.
//!
//! [`CartStore`] owns the shopper's [`Cart`] and mirrors it into a
//! [`KeyValueStore`] after every mutation. The in-memory cart is
//! authoritative: a failed write is logged and the mutation still stands.

use crate::cart::pricing::{self, CartSummary};
use crate::cart::{AddedItem, Cart, NewCartItem, QuantityUpdate};
use crate::catalog::CatalogSource;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use storefront_cache::{Cache, KeyValueStore};
use tracing::{debug, error, warn};

/// Key the cart record is stored under.
pub const DEFAULT_CART_KEY: &str = "storefront-cart";

/// The shopper's cart plus its durable mirror.
pub struct CartStore<S> {
    cache: Cache<S>,
    key: String,
    cart: Cart,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Restore the cart stored under [`DEFAULT_CART_KEY`].
    pub fn load(store: S) -> Self {
        Self::load_with_key(store, DEFAULT_CART_KEY)
    }

    /// Restore the cart stored under `key`.
    ///
    /// An absent or unreadable record yields an empty cart.
    pub fn load_with_key(store: S, key: impl Into<String>) -> Self {
        let cache = Cache::new(store);
        let key = key.into();

        let cart = match cache.get::<Cart>(&key) {
            Ok(Some(mut cart)) => {
                if cart.normalize() {
                    warn!(key = %key, "restored cart had out-of-range lines");
                }
                debug!(key = %key, lines = cart.unique_item_count(), "restored cart");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "discarding unreadable cart record");
                Cart::new()
            }
        };

        Self { cache, key, cart }
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Storage key of the cart record.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Add an item, merging with a matching line. Units past the per-item
    /// limit are dropped and reported in the returned [`AddedItem`].
    pub fn add_item(&mut self, item: NewCartItem) -> AddedItem {
        debug!(product = %item.id, quantity = item.quantity, "add to cart");
        let product = item.id.clone();
        let added = self.cart.add_item(item);
        if added.is_capped() {
            warn!(product = %product, dropped = added.dropped, "quantity capped at limit");
        }
        self.persist();
        added
    }

    /// Look a product up in the catalog and add it with the chosen options.
    pub async fn add_from_catalog<C: CatalogSource + ?Sized>(
        &mut self,
        catalog: &C,
        id: &ProductId,
        size: Option<String>,
        color: Option<String>,
        quantity: u32,
    ) -> Result<AddedItem, CommerceError> {
        let product = catalog
            .get_product(id)
            .await
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
        let item = NewCartItem::from_product(&product, size, color, quantity)?;
        Ok(self.add_item(item))
    }

    /// Remove every line for a product.
    pub fn remove_item(&mut self, id: &ProductId) -> &Cart {
        debug!(product = %id, "remove from cart");
        self.cart.remove_item(id);
        self.persist();
        &self.cart
    }

    /// Adjust the first line for a product by `delta`. Only persists if the
    /// cart changed.
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) -> QuantityUpdate {
        let outcome = self.cart.update_quantity(id, delta);
        debug!(product = %id, delta, ?outcome, "update quantity");
        if outcome.changed() {
            self.persist();
        }
        outcome
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) -> &Cart {
        debug!("clear cart");
        self.cart.clear();
        self.persist();
        &self.cart
    }

    pub fn total(&self) -> Money {
        self.cart.total()
    }

    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn calculate_shipping(&self, subtotal: Money) -> Money {
        pricing::calculate_shipping(subtotal)
    }

    pub fn calculate_tax(&self, subtotal: Money) -> Money {
        pricing::calculate_tax(subtotal)
    }

    pub fn calculate_total(&self, subtotal: Money) -> Money {
        pricing::calculate_total(subtotal)
    }

    /// Pricing breakdown of the current cart.
    pub fn summary(&self) -> CartSummary {
        CartSummary::for_cart(&self.cart)
    }

    fn persist(&self) {
        if let Err(e) = self.cache.set(&self.key, &self.cart) {
            error!(key = %self.key, error = %e, "failed to save cart");
        }
    }
}
