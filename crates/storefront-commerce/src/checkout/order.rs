//! Order types.

use crate::cart::{Cart, CartSummary};
use crate::checkout::OrderForm;
use crate::ids::{OrderId, ProductId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Submitted and being processed.
    #[default]
    Processing,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "Processing",
        }
    }
}

/// Who placed the order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// Where the order ships.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// A line in a submitted order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// An order ready for submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub customer: Customer,
    pub shipping: ShippingDetails,
    pub items: Vec<OrderItem>,
    /// Sum of price times quantity.
    pub subtotal: Money,
    pub shipping_cost: Money,
    pub tax: Money,
    /// Subtotal plus shipping plus tax.
    pub total: Money,
    pub payment_method: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
}

/// `CS-` followed by the last eight digits of the epoch milliseconds.
pub fn generate_order_id(now: DateTime<Utc>) -> OrderId {
    let millis = now.timestamp_millis().to_string();
    let tail = &millis[millis.len().saturating_sub(8)..];
    OrderId::new(format!("CS-{}", tail))
}

impl Order {
    /// Build an order from the cart and a (validated) form.
    ///
    /// Form values are trimmed; totals come from the cart.
    pub fn assemble(
        cart: &Cart,
        form: &OrderForm,
        payment_method: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let form = form.trimmed();
        let summary = CartSummary::for_cart(cart);

        Self {
            order_id: generate_order_id(now),
            customer: Customer {
                full_name: form.full_name,
                email: form.email,
                phone: form.phone,
            },
            shipping: ShippingDetails {
                address: form.address,
                city: form.city,
                state: form.state,
                zip_code: form.zip,
            },
            items: cart
                .items
                .iter()
                .map(|item| OrderItem {
                    product_id: item.id.clone(),
                    name: item.name.clone(),
                    price: item.price,
                    quantity: item.quantity,
                    size: item.size.clone(),
                    color: item.color.clone(),
                })
                .collect(),
            subtotal: summary.subtotal,
            shipping_cost: summary.shipping,
            tax: summary.tax,
            total: summary.total,
            payment_method: payment_method.into(),
            order_date: now,
            status: OrderStatus::Processing,
        }
    }

    /// Get total item count.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
