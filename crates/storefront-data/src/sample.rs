//! The bundled sample catalog.

use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use storefront_commerce::catalog::{
    CatalogError, CatalogSource, Category, Product, SubmitOrderResponse,
};
use storefront_commerce::checkout::{generate_order_id, Order};
use storefront_commerce::{Money, ProductId};
use tracing::{debug, instrument};

/// Simulated latency of catalog reads.
pub const DEFAULT_READ_LATENCY: Duration = Duration::from_millis(300);

/// Simulated latency of order submission.
pub const DEFAULT_SUBMIT_LATENCY: Duration = Duration::from_millis(1000);

/// In-process catalog serving the six sample products. Every order is
/// accepted.
#[derive(Debug, Clone)]
pub struct SampleCatalog {
    read_latency: Duration,
    submit_latency: Duration,
}

impl Default for SampleCatalog {
    fn default() -> Self {
        Self {
            read_latency: DEFAULT_READ_LATENCY,
            submit_latency: DEFAULT_SUBMIT_LATENCY,
        }
    }
}

impl SampleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// No simulated latency.
    pub fn instant() -> Self {
        Self::with_latency(Duration::ZERO, Duration::ZERO)
    }

    pub fn with_latency(read_latency: Duration, submit_latency: Duration) -> Self {
        Self {
            read_latency,
            submit_latency,
        }
    }

    async fn pause(latency: Duration) {
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl CatalogSource for SampleCatalog {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Vec<Product> {
        Self::pause(self.read_latency).await;
        sample_products()
    }

    #[instrument(skip(self, id), fields(id = %id))]
    async fn get_product(&self, id: &ProductId) -> Option<Product> {
        Self::pause(self.read_latency).await;
        find_sample(id)
    }

    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    async fn submit_order(&self, order: &Order) -> Result<SubmitOrderResponse, CatalogError> {
        Self::pause(self.submit_latency).await;
        let order_id = generate_order_id(Utc::now());
        debug!(%order_id, "sample catalog accepted order");
        Ok(SubmitOrderResponse::accepted(
            order_id.into_inner(),
            "Order placed successfully",
        ))
    }
}

/// Look up a sample product by id.
pub fn find_sample(id: &ProductId) -> Option<Product> {
    sample_products().into_iter().find(|p| &p.id == id)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    category: Category,
    cents: i64,
    description: &str,
    images: &[&str],
    sizes: Option<&[&str]>,
    colors: &[&str],
    rating: f32,
    reviews: u32,
) -> Product {
    let images = strings(images);
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        category,
        price: Money::new(cents),
        description: description.to_string(),
        image: images.first().cloned().unwrap_or_default(),
        images,
        sizes: sizes.map(strings),
        colors: Some(strings(colors)),
        in_stock: true,
        rating,
        reviews,
    }
}

/// The six sample products, in catalog order.
pub fn sample_products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Premium Wool Blend Suit",
            Category::Clothing,
            29999,
            "Crafted from premium wool blend, this suit offers exceptional comfort and style.",
            &[
                "assets/images/product1.jpg",
                "assets/images/product2.jpg",
                "assets/images/product3.jpg",
                "assets/images/product4.jpg",
            ],
            Some(&["S", "M", "L", "XL"]),
            &["Navy Blue", "Charcoal", "Black"],
            4.8,
            42,
        ),
        product(
            "2",
            "Classic Leather Oxford Shoes",
            Category::Shoes,
            18999,
            "Handcrafted leather oxford shoes with premium detailing.",
            &["assets/images/product2.jpg", "assets/images/product3.jpg"],
            Some(&["8", "9", "10", "11", "12"]),
            &["Brown", "Black"],
            4.7,
            31,
        ),
        product(
            "3",
            "Cashmere Wool Scarf",
            Category::Accessories,
            8999,
            "Luxurious cashmere wool scarf for ultimate comfort.",
            &["assets/images/product3.jpg", "assets/images/product4.jpg"],
            None,
            &["Navy", "Gray", "Beige"],
            4.9,
            28,
        ),
        product(
            "4",
            "Designer Wool Coat",
            Category::Clothing,
            34999,
            "Winter wool coat with premium insulation.",
            &["assets/images/product4.jpg", "assets/images/product1.jpg"],
            Some(&["S", "M", "L", "XL"]),
            &["Black", "Camel"],
            4.6,
            19,
        ),
        product(
            "5",
            "Leather Loafers",
            Category::Shoes,
            15999,
            "Comfortable leather loafers for casual occasions.",
            &["assets/images/product5.jpg"],
            Some(&["8", "9", "10", "11"]),
            &["Brown", "Black"],
            4.5,
            24,
        ),
        product(
            "6",
            "Leather Belt",
            Category::Accessories,
            5999,
            "Genuine leather belt with polished buckle.",
            &["assets/images/product6.jpg"],
            Some(&["S", "M", "L"]),
            &["Black", "Brown"],
            4.4,
            16,
        ),
    ]
}
