//! The catalog source seam.
//!
//! Reads degrade instead of failing: a source that cannot reach its backend
//! answers from a fallback product set. Order submission is the opposite:
//! failures propagate so checkout can tell the shopper.

use crate::catalog::{Category, Product};
use crate::checkout::Order;
use crate::ids::ProductId;
use crate::search::SearchQuery;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by a catalog source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// The response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Answer to an order submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl SubmitOrderResponse {
    /// A successful answer.
    pub fn accepted(order_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            order_id: Some(order_id.into()),
            message: Some(message.into()),
            timestamp: Some(Utc::now()),
        }
    }

    /// A refusal carrying the backend's reason.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Product data and order submission provider.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// All products, in catalog order. Never fails: on transport failure
    /// implementations answer from a fallback set.
    async fn list_products(&self) -> Vec<Product>;

    /// A single product, or `None` if the catalog has no such id.
    async fn get_product(&self, id: &ProductId) -> Option<Product>;

    /// Submit an order. Transport failures propagate.
    async fn submit_order(&self, order: &Order) -> Result<SubmitOrderResponse, CatalogError>;

    /// Products in one category.
    async fn products_by_category(&self, category: Category) -> Vec<Product> {
        SearchQuery::new()
            .with_category(category)
            .apply(&self.list_products().await)
    }

    /// Products whose name, description or category contain `query`,
    /// ignoring case.
    async fn search_products(&self, query: &str) -> Vec<Product> {
        SearchQuery::new()
            .with_text(query)
            .apply(&self.list_products().await)
    }
}

#[async_trait]
impl<T: CatalogSource + ?Sized> CatalogSource for std::sync::Arc<T> {
    async fn list_products(&self) -> Vec<Product> {
        (**self).list_products().await
    }

    async fn get_product(&self, id: &ProductId) -> Option<Product> {
        (**self).get_product(id).await
    }

    async fn submit_order(&self, order: &Order) -> Result<SubmitOrderResponse, CatalogError> {
        (**self).submit_order(order).await
    }
}
