//! Search module.
//!
//! In-memory filtering and ordering of a product listing.

mod query;

pub use query::{products_by_category, search_products, SearchQuery, SortOption};
