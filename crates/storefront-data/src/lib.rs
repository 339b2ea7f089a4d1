//! Catalog sources for the storefront.
//!
//! Two implementations of [`CatalogSource`] live here:
//!
//! - [`SampleCatalog`] serves the bundled six-product catalog with simulated
//!   latency and accepts every order.
//! - [`HttpCatalog`] talks to the storefront API and falls back to its last
//!   listing, or the sample catalog, when reads fail.
//!
//! [`CatalogConfig`] picks between them.
//!
//! # Example
//!
//! ```rust,no_run
//! use storefront_commerce::catalog::CatalogSource;
//! use storefront_data::HttpCatalog;
//!
//! # async fn run() {
//! let catalog = HttpCatalog::new("https://api.example.com");
//!
//! // Never fails: falls back to the sample catalog if the API is down.
//! let products = catalog.list_products().await;
//! for product in &products {
//!     println!("{} {}", product.name, product.price);
//! }
//! # }
//! ```
//!
//! [`CatalogSource`]: storefront_commerce::catalog::CatalogSource

mod client;
mod config;
mod error;
mod http;
mod sample;

pub use client::FetchClient;
pub use config::CatalogConfig;
pub use error::FetchError;
pub use http::{HttpCatalog, LISTING_CACHE_KEY};
pub use sample::{
    find_sample, sample_products, SampleCatalog, DEFAULT_READ_LATENCY, DEFAULT_SUBMIT_LATENCY,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CatalogConfig, FetchClient, FetchError, HttpCatalog, SampleCatalog};
}
