//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Unknown catalog category.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// The product does not come in the requested size or color.
    #[error("{product} is not available in {option} \"{value}\"")]
    UnavailableOption {
        product: String,
        option: &'static str,
        value: String,
    },

    /// Product is not currently purchasable.
    #[error("{0} is out of stock")]
    OutOfStock(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),
}
