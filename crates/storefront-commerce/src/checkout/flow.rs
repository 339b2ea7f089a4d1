//! Checkout coordinator.
//!
//! Drives one checkout attempt: validate the form, refuse an empty cart,
//! assemble and submit the order, then either clear the cart or surface the
//! failure. Presentation goes through [`CheckoutView`].

use crate::cart::CartStore;
use crate::catalog::CatalogSource;
use crate::checkout::{FormErrors, FormField, FormValidator, Order, OrderForm};
use crate::ids::OrderId;
use chrono::Utc;
use std::time::Duration;
use storefront_cache::{KeyValueStore, MemoryStore, SessionStore};
use tracing::{debug, error, info, warn};

/// Session key holding the formatted shipping address of the last order.
pub const SHIPPING_ADDRESS_KEY: &str = "shippingAddress";

/// Payment method recorded when the UI has not picked one.
pub const DEFAULT_PAYMENT_METHOD: &str = "Stripe";

const INVALID_FORM_MESSAGE: &str = "Please fix the errors in the form";
const EMPTY_CART_MESSAGE: &str = "Your cart is empty";
const DECLINED_MESSAGE: &str = "Order submission failed";
const FAILED_MESSAGE: &str = "Failed to process order. Please try again.";

/// Where the coordinator is in the checkout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Idle,
    Submitting,
    Success { order_id: OrderId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A transient message for the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }
}

/// UI side of the checkout.
pub trait CheckoutView {
    /// Show a transient notification.
    fn notify(&self, notification: Notification);

    /// Show the loading indicator.
    fn show_loading(&self);

    /// Hide the loading indicator once `after` has passed.
    fn hide_loading(&self, after: Duration);

    /// Move to the order confirmation once `after` has passed.
    fn show_confirmation(&self, order: &PlacedOrder, after: Duration);
}

/// Delays applied to the UI after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutTimings {
    pub loading_hide_delay: Duration,
    pub confirmation_delay: Duration,
}

impl Default for CheckoutTimings {
    fn default() -> Self {
        Self {
            loading_hide_delay: Duration::from_millis(500),
            confirmation_delay: Duration::from_millis(1500),
        }
    }
}

/// An accepted order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    /// Id the backend confirmed, or the one the order was submitted with.
    pub order_id: OrderId,
    pub order: Order,
    pub message: Option<String>,
    /// `fullName, address, city, state zip`.
    pub shipping_address: String,
}

/// Result of one [`CheckoutCoordinator::handle_checkout`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    InvalidForm(FormErrors),
    EmptyCart,
    Placed(PlacedOrder),
    Failed { message: String },
}

impl CheckoutOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CheckoutOutcome::Placed(_))
    }
}

/// Hides the loading indicator when dropped, whichever way submission ends.
struct LoadingGuard<'a, V: CheckoutView> {
    view: &'a V,
    delay: Duration,
}

impl<'a, V: CheckoutView> LoadingGuard<'a, V> {
    fn show(view: &'a V, delay: Duration) -> Self {
        view.show_loading();
        Self { view, delay }
    }
}

impl<V: CheckoutView> Drop for LoadingGuard<'_, V> {
    fn drop(&mut self) {
        self.view.hide_loading(self.delay);
    }
}

/// Orchestrates checkout against a catalog source.
pub struct CheckoutCoordinator<C, V, S = MemoryStore> {
    catalog: C,
    view: V,
    session: SessionStore<S>,
    validator: FormValidator,
    timings: CheckoutTimings,
    payment_method: String,
    state: CheckoutState,
}

impl<C: CatalogSource, V: CheckoutView> CheckoutCoordinator<C, V, MemoryStore> {
    /// Coordinator with a fresh in-memory session.
    pub fn new(catalog: C, view: V) -> Self {
        Self::with_session(catalog, view, SessionStore::ephemeral())
    }
}

impl<C, V, S> CheckoutCoordinator<C, V, S>
where
    C: CatalogSource,
    V: CheckoutView,
    S: KeyValueStore,
{
    pub fn with_session(catalog: C, view: V, session: SessionStore<S>) -> Self {
        Self {
            catalog,
            view,
            session,
            validator: FormValidator::new(),
            timings: CheckoutTimings::default(),
            payment_method: DEFAULT_PAYMENT_METHOD.to_string(),
            state: CheckoutState::Idle,
        }
    }

    pub fn with_timings(mut self, timings: CheckoutTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn with_validator(mut self, validator: FormValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Payment method to record on orders. Blank falls back to the default.
    pub fn set_payment_method(&mut self, method: impl Into<String>) {
        let method = method.into();
        self.payment_method = if method.trim().is_empty() {
            DEFAULT_PAYMENT_METHOD.to_string()
        } else {
            method
        };
    }

    pub fn payment_method(&self) -> &str {
        &self.payment_method
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    /// Check one field as the shopper edits it.
    pub fn validate_field(&mut self, field: FormField, value: &str) -> bool {
        self.validator.validate_field(field, value)
    }

    /// Check the whole form.
    pub fn validate_form(&mut self, form: &OrderForm) -> bool {
        self.validator.validate_form(form)
    }

    pub fn errors(&self) -> &FormErrors {
        self.validator.errors()
    }

    /// Shipping address stored by the last successful checkout in this
    /// session.
    pub fn shipping_address(&self) -> Option<String> {
        match self.session.get::<String>(SHIPPING_ADDRESS_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "unreadable shipping address in session");
                None
            }
        }
    }

    /// Run one checkout attempt.
    ///
    /// On success the cart is cleared; on any failure it is left untouched
    /// and the coordinator returns to `Idle`.
    pub async fn handle_checkout<K: KeyValueStore>(
        &mut self,
        cart: &mut CartStore<K>,
        form: &OrderForm,
    ) -> CheckoutOutcome {
        if !self.validator.validate_form(form) {
            debug!(errors = self.validator.errors().len(), "checkout form invalid");
            self.state = CheckoutState::Idle;
            self.view.notify(Notification::error(INVALID_FORM_MESSAGE));
            return CheckoutOutcome::InvalidForm(self.validator.errors().clone());
        }

        if cart.is_empty() {
            self.state = CheckoutState::Idle;
            self.view.notify(Notification::error(EMPTY_CART_MESSAGE));
            return CheckoutOutcome::EmptyCart;
        }

        self.state = CheckoutState::Submitting;
        let _loading = LoadingGuard::show(&self.view, self.timings.loading_hide_delay);

        let order = Order::assemble(cart.cart(), form, self.payment_method.as_str(), Utc::now());
        info!(order_id = %order.order_id, total = %order.total, items = order.items.len(), "submitting order");

        let failure = match self.catalog.submit_order(&order).await {
            Ok(response) if response.success => {
                let shipping_address = form.shipping_summary();
                if let Err(e) = self.session.set(SHIPPING_ADDRESS_KEY, &shipping_address) {
                    warn!(error = %e, "failed to store shipping address");
                }
                cart.clear_cart();

                let placed = PlacedOrder {
                    order_id: response
                        .order_id
                        .map(OrderId::new)
                        .unwrap_or_else(|| order.order_id.clone()),
                    order,
                    message: response.message,
                    shipping_address,
                };
                info!(order_id = %placed.order_id, "order placed");

                self.state = CheckoutState::Success {
                    order_id: placed.order_id.clone(),
                };
                self.view
                    .show_confirmation(&placed, self.timings.confirmation_delay);
                return CheckoutOutcome::Placed(placed);
            }
            Ok(response) => response
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DECLINED_MESSAGE.to_string()),
            Err(e) => e.to_string(),
        };

        let message = if failure.is_empty() {
            FAILED_MESSAGE.to_string()
        } else {
            failure
        };
        error!(order_id = %order.order_id, %message, "checkout failed");

        self.state = CheckoutState::Idle;
        self.view.notify(Notification::error(message.clone()));
        CheckoutOutcome::Failed { message }
    }
}
