//! Checkout module.
//!
//! Contains the order form and its validation rules, order assembly, and
//! the checkout coordinator.

mod flow;
mod form;
mod order;
mod validation;

pub use flow::{
    CheckoutCoordinator, CheckoutOutcome, CheckoutState, CheckoutTimings, CheckoutView,
    Notification, NotificationLevel, PlacedOrder, DEFAULT_PAYMENT_METHOD, SHIPPING_ADDRESS_KEY,
};
pub use form::OrderForm;
pub use order::{generate_order_id, Customer, Order, OrderItem, OrderStatus, ShippingDetails};
pub use validation::{FieldError, FieldRule, FormErrors, FormField, FormValidator, ValidationRules};
