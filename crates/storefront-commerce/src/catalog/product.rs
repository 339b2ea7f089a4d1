//! Product types.

use crate::catalog::Category;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Rating at or above which a product gets the "Premium" badge.
pub const PREMIUM_RATING: f32 = 4.5;

/// A product in the catalog.
///
/// Products are owned by the catalog source and never mutated by the
/// storefront once fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Department.
    pub category: Category,
    /// Unit price.
    pub price: Money,
    /// Long description.
    pub description: String,
    /// Primary image reference.
    pub image: String,
    /// Gallery images, primary first.
    #[serde(default)]
    pub images: Vec<String>,
    /// Available sizes, if the product is sized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    /// Available colors, if the product comes in several.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    /// Whether the product can currently be bought.
    pub in_stock: bool,
    /// Average rating, 0.0 to 5.0.
    pub rating: f32,
    /// Number of reviews.
    pub reviews: u32,
}

impl Product {
    /// Products rated 4.5 or higher are badged as premium.
    pub fn is_premium(&self) -> bool {
        self.rating >= PREMIUM_RATING
    }

    /// Star breakdown for the product's rating.
    pub fn star_rating(&self) -> StarRating {
        StarRating::from_rating(self.rating)
    }

    /// Check whether `size` is one of the product's sizes.
    pub fn offers_size(&self, size: &str) -> bool {
        offers(&self.sizes, size)
    }

    /// Check whether `color` is one of the product's colors.
    pub fn offers_color(&self, color: &str) -> bool {
        offers(&self.colors, color)
    }
}

fn offers(options: &Option<Vec<String>>, wanted: &str) -> bool {
    options
        .as_ref()
        .is_some_and(|opts| opts.iter().any(|o| o.eq_ignore_ascii_case(wanted)))
}

/// Five-star breakdown of a rating: whole stars, an optional half star, and
/// the remaining empty stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRating {
    /// Break a 0-5 rating into stars. A fractional part of .5 or more earns
    /// a half star.
    pub fn from_rating(rating: f32) -> Self {
        let rating = rating.clamp(0.0, 5.0);
        let full = rating.floor() as u8;
        let half = full < 5 && rating.fract() >= 0.5;
        let empty = 5 - full - u8::from(half);
        Self { full, half, empty }
    }

    /// Render as text stars, e.g. `★★★★½`.
    pub fn render(&self) -> String {
        let mut out = "★".repeat(self.full as usize);
        if self.half {
            out.push('½');
        }
        out.push_str(&"☆".repeat(self.empty as usize));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(rating: f32) -> Product {
        Product {
            id: ProductId::new("1"),
            name: "Premium Wool Blend Suit".to_string(),
            category: Category::Clothing,
            price: Money::from_decimal(299.99),
            description: "Wool suit".to_string(),
            image: "assets/images/product1.jpg".to_string(),
            images: vec![],
            sizes: Some(vec!["S".into(), "M".into()]),
            colors: None,
            in_stock: true,
            rating,
            reviews: 42,
        }
    }

    #[test]
    fn test_premium_badge() {
        assert!(product(4.8).is_premium());
        assert!(product(4.5).is_premium());
        assert!(!product(4.4).is_premium());
    }

    #[test]
    fn test_star_rating() {
        assert_eq!(
            StarRating::from_rating(4.7),
            StarRating { full: 4, half: true, empty: 0 }
        );
        assert_eq!(
            StarRating::from_rating(4.4),
            StarRating { full: 4, half: false, empty: 1 }
        );
        assert_eq!(
            StarRating::from_rating(5.0),
            StarRating { full: 5, half: false, empty: 0 }
        );
        assert_eq!(
            StarRating::from_rating(0.0),
            StarRating { full: 0, half: false, empty: 5 }
        );
    }

    #[test]
    fn test_star_render() {
        assert_eq!(StarRating::from_rating(3.5).render(), "★★★½☆");
    }

    #[test]
    fn test_offers_options() {
        let p = product(4.0);
        assert!(p.offers_size("m"));
        assert!(!p.offers_size("XL"));
        assert!(!p.offers_color("Black"));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": "3",
            "name": "Cashmere Wool Scarf",
            "category": "accessories",
            "price": 89.99,
            "description": "Luxurious cashmere wool scarf.",
            "image": "assets/images/product3.jpg",
            "colors": ["Navy", "Gray"],
            "inStock": true,
            "rating": 4.9,
            "reviews": 28
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.price.amount_cents, 8999);
        assert!(p.sizes.is_none());
        assert!(p.images.is_empty());
        assert_eq!(p.category, Category::Accessories);
    }
}
