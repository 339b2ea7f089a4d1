//! Type-safe key-value storage for the storefront.
//!
//! The cart is mirrored into a durable store under a single key, and
//! short-lived checkout data lives in a session-scoped store. Both sit on the
//! same [`KeyValueStore`] seam so tests can swap in memory-backed stores.
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::{Cache, MemoryStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Record {
//!     items: Vec<String>,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("cart", &Record { items: vec!["1".into()] }).unwrap();
//!
//! let record: Option<Record> = cache.get("cart").unwrap();
//! assert_eq!(record.unwrap().items, vec!["1".to_string()]);
//! ```

mod error;
mod kv;
mod session;

pub use error::CacheError;
pub use kv::{Cache, FileStore, KeyValueStore, MemoryStore};
pub use session::{SessionId, SessionStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Cache, CacheError, FileStore, KeyValueStore, MemoryStore, SessionId, SessionStore,
    };
}
