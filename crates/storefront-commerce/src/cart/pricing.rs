//! Cart pricing calculations.

use crate::cart::Cart;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Subtotals strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::new(150_00);

/// Shipping charged at or below the threshold.
pub const FLAT_SHIPPING_RATE: Money = Money::new(15_00);

/// Sales tax rate applied to the subtotal.
pub const TAX_RATE: f64 = 0.08;

/// Shipping for a subtotal.
pub fn calculate_shipping(subtotal: Money) -> Money {
    if subtotal > FREE_SHIPPING_THRESHOLD {
        Money::zero()
    } else {
        FLAT_SHIPPING_RATE
    }
}

/// Tax for a subtotal, rounded to the cent.
pub fn calculate_tax(subtotal: Money) -> Money {
    subtotal.multiply_decimal(TAX_RATE)
}

/// Subtotal plus shipping plus tax.
pub fn calculate_total(subtotal: Money) -> Money {
    subtotal + calculate_shipping(subtotal) + calculate_tax(subtotal)
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Units across all lines.
    pub item_count: u32,
    /// Sum of price times quantity.
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    /// Final total (subtotal + shipping + tax).
    pub total: Money,
}

impl CartSummary {
    /// Price a cart.
    pub fn for_cart(cart: &Cart) -> Self {
        let subtotal = cart.total();
        Self {
            item_count: cart.item_count(),
            subtotal,
            shipping: calculate_shipping(subtotal),
            tax: calculate_tax(subtotal),
            total: calculate_total(subtotal),
        }
    }

    /// Check if shipping is free.
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}
