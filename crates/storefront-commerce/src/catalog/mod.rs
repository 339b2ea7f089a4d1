//! Product catalog module.
//!
//! Contains the product model and the [`CatalogSource`] seam through which
//! products are fetched and orders are submitted.

mod category;
mod product;
mod source;

pub use category::Category;
pub use product::{Product, StarRating};
pub use source::{CatalogError, CatalogSource, SubmitOrderResponse};
