//! HttpCatalog against a local API server.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::{Arc, Mutex};
use storefront_cache::{FileStore, KeyValueStore};
use storefront_commerce::catalog::{CatalogError, CatalogSource, Product, SubmitOrderResponse};
use storefront_commerce::checkout::Order;
use storefront_commerce::Money;
use storefront_data::{sample_products, FetchClient, HttpCatalog, LISTING_CACHE_KEY};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Api {
    products: Vec<Product>,
    orders: Arc<Mutex<Vec<Order>>>,
    checkout_status: Option<StatusCode>,
}

async fn list(State(api): State<Api>) -> Json<Vec<Product>> {
    Json(api.products)
}

async fn one(State(api): State<Api>, Path(id): Path<String>) -> Result<Json<Product>, StatusCode> {
    api.products
        .into_iter()
        .find(|p| p.id.as_str() == id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn checkout(
    State(api): State<Api>,
    Json(order): Json<Order>,
) -> Result<Json<SubmitOrderResponse>, StatusCode> {
    if let Some(status) = api.checkout_status {
        return Err(status);
    }
    let order_id = order.order_id.to_string();
    api.orders.lock().unwrap().push(order);
    Ok(Json(SubmitOrderResponse::accepted(order_id, "Order received")))
}

async fn spawn_api(api: Api) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let app = Router::new()
        .route("/api/products", get(list))
        .route("/api/products/{id}", get(one))
        .route("/api/cart/checkout", post(checkout))
        .with_state(api);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn api_products() -> Vec<Product> {
    let mut products = sample_products();
    products.truncate(2);
    products[0].price = Money::new(25000);
    products
}

fn order() -> Order {
    Order::assemble(
        &Default::default(),
        &Default::default(),
        "Stripe",
        chrono::Utc::now(),
    )
}

#[tokio::test]
async fn test_lists_from_api_and_caches() {
    let base = spawn_api(Api {
        products: api_products(),
        ..Api::default()
    })
    .await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::open(dir.path()).unwrap());
    let catalog = HttpCatalog::with_store(FetchClient::new(&base), store.clone());

    let products = catalog.list_products().await;
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].price, Money::new(25000));
    assert!(store.exists(LISTING_CACHE_KEY).unwrap());

    // A later run against a dead API answers from the cached listing.
    let offline = HttpCatalog::with_store(FetchClient::new("http://127.0.0.1:9"), store);
    assert_eq!(offline.list_products().await, products);
}

#[tokio::test]
async fn test_get_product() {
    let base = spawn_api(Api {
        products: api_products(),
        ..Api::default()
    })
    .await;
    let catalog = HttpCatalog::new(base);

    let suit = catalog.get_product(&"1".into()).await.unwrap();
    assert_eq!(suit.price, Money::new(25000));
}

#[tokio::test]
async fn test_get_product_with_reserved_characters_in_id() {
    let mut products = api_products();
    products[1].id = "a/b?x#y".into();
    let base = spawn_api(Api {
        products,
        ..Api::default()
    })
    .await;
    let catalog = HttpCatalog::new(base);

    let product = catalog.get_product(&"a/b?x#y".into()).await.unwrap();
    assert_eq!(product.id.as_str(), "a/b?x#y");
}

#[tokio::test]
async fn test_missing_product_falls_back_to_sample() {
    let base = spawn_api(Api::default()).await;
    let catalog = HttpCatalog::new(base);

    // 404 from the API, then the sample catalog has it.
    let scarf = catalog.get_product(&"3".into()).await.unwrap();
    assert_eq!(scarf.name, "Cashmere Wool Scarf");
    assert!(catalog.get_product(&"404".into()).await.is_none());
}

#[tokio::test]
async fn test_submit_order_posts_json() {
    let api = Api::default();
    let orders = api.orders.clone();
    let base = spawn_api(api).await;
    let catalog = HttpCatalog::new(base);
    let order = order();

    let response = catalog.submit_order(&order).await.unwrap();
    assert!(response.success);
    assert_eq!(response.order_id.as_deref(), Some(order.order_id.as_str()));

    let received = orders.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].payment_method, "Stripe");
}

#[tokio::test]
async fn test_submit_order_http_error() {
    let base = spawn_api(Api {
        checkout_status: Some(StatusCode::BAD_GATEWAY),
        ..Api::default()
    })
    .await;
    let catalog = HttpCatalog::new(base);

    let err = catalog.submit_order(&order()).await.unwrap_err();
    assert_eq!(err, CatalogError::Http { status: 502 });
}
