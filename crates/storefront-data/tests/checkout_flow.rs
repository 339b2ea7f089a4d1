//! Cart to confirmed order, across the cart store, the coordinator and a
//! catalog source.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storefront_cache::{FileStore, SessionId, SessionStore};
use storefront_commerce::cart::{CartStore, NewCartItem};
use storefront_commerce::catalog::{CatalogError, CatalogSource, Product, SubmitOrderResponse};
use storefront_commerce::checkout::{
    CheckoutCoordinator, CheckoutOutcome, CheckoutState, CheckoutTimings, CheckoutView,
    Notification, Order, OrderForm, PlacedOrder, SHIPPING_ADDRESS_KEY,
};
use storefront_commerce::{Money, ProductId};
use storefront_data::SampleCatalog;

#[derive(Default)]
struct TestView {
    notifications: Mutex<Vec<Notification>>,
    loading_hidden: Mutex<u32>,
    confirmed: Mutex<Option<String>>,
}

impl CheckoutView for TestView {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }

    fn show_loading(&self) {}

    fn hide_loading(&self, _after: Duration) {
        *self.loading_hidden.lock().unwrap() += 1;
    }

    fn show_confirmation(&self, order: &PlacedOrder, _after: Duration) {
        *self.confirmed.lock().unwrap() = Some(order.order_id.to_string());
    }
}

/// Answers every submission with a fixed response.
struct Stub(SubmitOrderResponse);

#[async_trait]
impl CatalogSource for Stub {
    async fn list_products(&self) -> Vec<Product> {
        Vec::new()
    }

    async fn get_product(&self, _id: &ProductId) -> Option<Product> {
        None
    }

    async fn submit_order(&self, _order: &Order) -> Result<SubmitOrderResponse, CatalogError> {
        Ok(self.0.clone())
    }
}

fn form() -> OrderForm {
    OrderForm {
        full_name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "5551234567".to_string(),
        address: "12 Main St".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip: "62701".to_string(),
    }
}

fn cart_in(dir: &std::path::Path) -> CartStore<FileStore> {
    CartStore::load(FileStore::open(dir).unwrap())
}

#[tokio::test]
async fn test_successful_checkout_clears_persisted_cart() {
    let dir = tempfile::tempdir().unwrap();
    let mut cart = cart_in(dir.path());
    cart.add_item(NewCartItem::new("5", "Leather Loafers", Money::from_decimal(50.0)).with_quantity(2));

    let mut checkout = CheckoutCoordinator::new(
        Stub(SubmitOrderResponse::accepted("CS-00000042", "Order placed successfully")),
        TestView::default(),
    );
    let outcome = checkout.handle_checkout(&mut cart, &form()).await;

    let CheckoutOutcome::Placed(placed) = outcome else {
        panic!("expected placed order");
    };
    assert_eq!(placed.order.subtotal.amount_cents, 10000);
    assert_eq!(placed.order.total.amount_cents, 12300);
    assert_eq!(
        checkout.state(),
        &CheckoutState::Success {
            order_id: "CS-00000042".into()
        }
    );
    assert!(cart.is_empty());
    assert!(cart_in(dir.path()).is_empty());
    assert_eq!(
        checkout.view().confirmed.lock().unwrap().as_deref(),
        Some("CS-00000042")
    );
    assert_eq!(*checkout.view().loading_hidden.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_declined_checkout_keeps_cart() {
    let dir = tempfile::tempdir().unwrap();
    let mut cart = cart_in(dir.path());
    cart.add_item(NewCartItem::new("5", "Leather Loafers", Money::from_decimal(50.0)).with_quantity(2));

    let mut checkout = CheckoutCoordinator::new(
        Stub(SubmitOrderResponse::rejected("declined")),
        TestView::default(),
    );
    let outcome = checkout.handle_checkout(&mut cart, &form()).await;

    assert_eq!(
        outcome,
        CheckoutOutcome::Failed {
            message: "declined".to_string()
        }
    );
    assert_eq!(checkout.state(), &CheckoutState::Idle);
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart_in(dir.path()).item_count(), 2);
    assert_eq!(
        checkout.view().notifications.lock().unwrap().clone(),
        vec![Notification::error("declined")]
    );
    assert_eq!(*checkout.view().loading_hidden.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_checkout_against_sample_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Arc::new(SampleCatalog::instant());
    let mut cart = cart_in(dir.path());
    cart.add_from_catalog(catalog.as_ref(), &"3".into(), None, Some("Gray".into()), 1)
        .await
        .unwrap();
    cart.add_from_catalog(catalog.as_ref(), &"6".into(), Some("M".into()), None, 2)
        .await
        .unwrap();

    let session = SessionStore::new(
        SessionId::generate(),
        FileStore::open(dir.path().join("session")).unwrap(),
    );
    let mut checkout = CheckoutCoordinator::with_session(catalog, TestView::default(), session)
        .with_timings(CheckoutTimings {
            loading_hide_delay: Duration::ZERO,
            confirmation_delay: Duration::ZERO,
        });

    let outcome = checkout.handle_checkout(&mut cart, &form()).await;

    let CheckoutOutcome::Placed(placed) = outcome else {
        panic!("expected placed order");
    };
    assert!(placed.order_id.as_str().starts_with("CS-"));
    // 89.99 + 2 * 59.99 = 209.97, free shipping, 16.80 tax
    assert_eq!(placed.order.subtotal.amount_cents, 20997);
    assert!(placed.order.shipping_cost.is_zero());
    assert_eq!(placed.order.tax.amount_cents, 1680);
    assert_eq!(
        checkout
            .session()
            .get::<String>(SHIPPING_ADDRESS_KEY)
            .unwrap()
            .as_deref(),
        Some("Jane Doe, 12 Main St, Springfield, IL 62701")
    );
    assert!(cart.is_empty());
}
