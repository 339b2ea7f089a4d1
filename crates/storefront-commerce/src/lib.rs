//! Storefront domain types and logic.
//!
//! This crate holds everything the storefront knows about shopping:
//!
//! - **Catalog**: Products, categories, and the [`CatalogSource`] seam
//! - **Search**: Text and category filtering of a listing
//! - **Cart**: Persisted cart with line items and derived totals
//! - **Checkout**: Form validation, order assembly, and the coordinator
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//! use storefront_cache::MemoryStore;
//!
//! let mut cart = CartStore::load(MemoryStore::new());
//! cart.add_item(NewCartItem::new("1", "Premium Wool Blend Suit", Money::new(29999)));
//! cart.add_item(NewCartItem::new("1", "Premium Wool Blend Suit", Money::new(29999)));
//!
//! let summary = cart.summary();
//! assert_eq!(summary.item_count, 2);
//! assert!(summary.free_shipping());
//! println!("Total: {}", summary.total);
//! ```
//!
//! [`CatalogSource`]: catalog::CatalogSource

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{format_currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{format_currency, Money};

    // Catalog
    pub use crate::catalog::{
        CatalogError, CatalogSource, Category, Product, StarRating, SubmitOrderResponse,
    };

    // Cart
    pub use crate::cart::{
        AddedItem, Cart, CartItem, CartStore, CartSummary, NewCartItem, QuantityUpdate,
        MAX_QUANTITY_PER_ITEM,
    };

    // Checkout
    pub use crate::checkout::{
        CheckoutCoordinator, CheckoutOutcome, CheckoutState, CheckoutTimings, CheckoutView,
        FormField, FormValidator, Notification, NotificationLevel, Order, OrderForm,
        OrderStatus, PlacedOrder,
    };

    // Search
    pub use crate::search::{SearchQuery, SortOption};
}
