//! Shopping cart module.
//!
//! Contains the cart and line item types, pricing rules, and the persisted
//! cart store.

mod cart;
pub mod pricing;
mod store;

pub use cart::{
    AddedItem, Cart, CartItem, NewCartItem, QuantityUpdate, MAX_QUANTITY_PER_ITEM, MAX_UNIT_PRICE,
};
pub use pricing::{
    calculate_shipping, calculate_tax, calculate_total, CartSummary, FLAT_SHIPPING_RATE,
    FREE_SHIPPING_THRESHOLD, TAX_RATE,
};
pub use store::{CartStore, DEFAULT_CART_KEY};
