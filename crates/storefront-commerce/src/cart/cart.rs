//! Cart and line item types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 10;

/// A shopping cart.
///
/// Lines keep insertion order. Every line's quantity stays within
/// `1..=MAX_QUANTITY_PER_ITEM`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Items in the cart.
    pub items: Vec<CartItem>,
    /// Time of the last mutation.
    pub updated_at: DateTime<Utc>,
}

/// What an [`Cart::update_quantity`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The quantity dropped below 1 and the line was removed.
    Removed,
    /// The line now has this quantity.
    Set(u32),
    /// The new quantity would exceed the per-item limit; nothing changed.
    Ignored,
    /// No line has that product id.
    NotFound,
}

/// What a [`Cart::add_item`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddedItem {
    /// Quantity of the line after the add.
    pub quantity: u32,
    /// Requested units that did not fit under the per-item limit.
    pub dropped: u32,
}

impl AddedItem {
    /// Whether the per-item limit cut the add short.
    pub fn is_capped(&self) -> bool {
        self.dropped > 0
    }
}

impl QuantityUpdate {
    /// Whether the cart was modified.
    pub fn changed(&self) -> bool {
        matches!(self, QuantityUpdate::Removed | QuantityUpdate::Set(_))
    }
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Add an item to the cart.
    ///
    /// A line with the same product, size and color absorbs the quantity,
    /// capped at `MAX_QUANTITY_PER_ITEM`. Otherwise the item is appended.
    /// Units beyond the cap are reported in [`AddedItem::dropped`].
    pub fn add_item(&mut self, item: NewCartItem) -> AddedItem {
        let quantity = if item.quantity == 0 { 1 } else { item.quantity };

        let current = self
            .items
            .iter()
            .position(|i| i.id == item.id && i.size == item.size && i.color == item.color);
        let held = current.map_or(0, |index| self.items[index].quantity);
        let wanted = held.saturating_add(quantity);
        let added = AddedItem {
            quantity: wanted.min(MAX_QUANTITY_PER_ITEM),
            dropped: wanted.saturating_sub(MAX_QUANTITY_PER_ITEM),
        };

        match current {
            Some(index) => self.items[index].quantity = added.quantity,
            None => self.items.push(CartItem {
                id: item.id,
                name: item.name,
                price: item.price,
                image: item.image,
                size: item.size,
                color: item.color,
                quantity: added.quantity,
                added_at: Utc::now(),
            }),
        }
        self.touch();
        added
    }

    /// Remove every line for a product. Returns whether anything was removed.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        let removed = self.items.len() < len_before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Change the first line for a product by `delta`.
    ///
    /// Dropping below 1 removes the line; exceeding the limit is ignored.
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) -> QuantityUpdate {
        let Some(pos) = self.items.iter().position(|i| &i.id == id) else {
            return QuantityUpdate::NotFound;
        };

        let new_quantity = i64::from(self.items[pos].quantity).saturating_add(delta);
        if new_quantity < 1 {
            self.items.remove(pos);
            self.touch();
            QuantityUpdate::Removed
        } else if new_quantity > i64::from(MAX_QUANTITY_PER_ITEM) {
            QuantityUpdate::Ignored
        } else {
            let quantity = new_quantity as u32;
            self.items[pos].quantity = quantity;
            self.touch();
            QuantityUpdate::Set(quantity)
        }
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    /// Sum of price times quantity over all lines.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First line for a product.
    pub fn get_item(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Bring a restored cart back within the limits: lines with a zero
    /// quantity, a negative price or a price whose line total cannot be
    /// represented are dropped, and larger quantities are capped. Returns
    /// whether anything changed.
    pub fn normalize(&mut self) -> bool {
        let mut changed = false;
        self.items.retain(|i| {
            let keep = i.quantity > 0 && is_valid_price(i.price);
            changed |= !keep;
            keep
        });
        for item in &mut self.items {
            if item.quantity > MAX_QUANTITY_PER_ITEM {
                item.quantity = MAX_QUANTITY_PER_ITEM;
                changed = true;
            }
        }
        changed
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Largest unit price a restored line may carry: a full line of it still
/// fits in an `i64` of cents.
pub const MAX_UNIT_PRICE: Money = Money::new(i64::MAX / MAX_QUANTITY_PER_ITEM as i64);

fn is_valid_price(price: Money) -> bool {
    (0..=MAX_UNIT_PRICE.amount_cents).contains(&price.amount_cents)
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// A line in the cart.
///
/// Name, price and image are snapshots taken when the product was added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product ID.
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub image: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Price times quantity.
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }

    /// Human-readable option summary, e.g. `Size: M, Color: Navy`.
    pub fn options_label(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(size) = &self.size {
            parts.push(format!("Size: {}", size));
        }
        if let Some(color) = &self.color {
            parts.push(format!("Color: {}", color));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// An item on its way into the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub image: String,
    pub size: Option<String>,
    pub color: Option<String>,
    /// Units to add; 0 means 1.
    pub quantity: u32,
}

impl NewCartItem {
    /// Snapshot a catalog product.
    ///
    /// Fails if the product is out of stock, if the quantity is above the
    /// per-item limit, or if the product does not come in the requested
    /// size or color.
    pub fn from_product(
        product: &Product,
        size: Option<String>,
        color: Option<String>,
        quantity: u32,
    ) -> Result<Self, CommerceError> {
        if !product.in_stock {
            return Err(CommerceError::OutOfStock(product.name.clone()));
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::InvalidQuantity(i64::from(quantity)));
        }
        if let Some(size) = &size {
            if !product.offers_size(size) {
                return Err(CommerceError::UnavailableOption {
                    product: product.name.clone(),
                    option: "size",
                    value: size.clone(),
                });
            }
        }
        if let Some(color) = &color {
            if !product.offers_color(color) {
                return Err(CommerceError::UnavailableOption {
                    product: product.name.clone(),
                    option: "color",
                    value: color.clone(),
                });
            }
        }

        Ok(Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            size,
            color,
            quantity,
        })
    }

    /// Build an item directly.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: String::new(),
            size: None,
            color: None,
            quantity: 1,
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    fn shirt() -> NewCartItem {
        NewCartItem::new("4", "Cotton Dress Shirt", Money::new(7999))
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        cart.add_item(shirt().with_quantity(2));

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.unique_item_count(), 1);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        cart.add_item(shirt().with_quantity(0));
        cart.add_item(shirt().with_quantity(0));
        cart.add_item(shirt().with_quantity(3));

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_different_options_are_separate_lines() {
        let mut cart = Cart::new();
        cart.add_item(shirt().with_size("M"));
        cart.add_item(shirt().with_size("L"));
        cart.add_item(shirt().with_size("M").with_color("White"));

        assert_eq!(cart.unique_item_count(), 3);
    }

    #[test]
    fn test_merge_caps_at_limit() {
        let mut cart = Cart::new();
        let first = cart.add_item(shirt().with_quantity(8));
        assert_eq!(first, AddedItem { quantity: 8, dropped: 0 });
        assert!(!first.is_capped());

        let second = cart.add_item(shirt().with_quantity(5));
        assert_eq!(cart.items[0].quantity, MAX_QUANTITY_PER_ITEM);
        assert_eq!(second, AddedItem { quantity: 10, dropped: 3 });
        assert!(second.is_capped());
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add_item(shirt());

        assert_eq!(cart.update_quantity(&"4".into(), 4), QuantityUpdate::Set(5));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_update_quantity_below_one_removes() {
        let mut cart = Cart::new();
        cart.add_item(shirt().with_quantity(3));

        assert_eq!(cart.update_quantity(&"4".into(), -3), QuantityUpdate::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_above_limit_ignored() {
        let mut cart = Cart::new();
        cart.add_item(shirt().with_quantity(10));
        let before = cart.updated_at;

        assert_eq!(cart.update_quantity(&"4".into(), 1), QuantityUpdate::Ignored);
        assert_eq!(cart.items[0].quantity, 10);
        assert_eq!(cart.updated_at, before);
    }

    #[test]
    fn test_update_quantity_touches_first_line_only() {
        let mut cart = Cart::new();
        cart.add_item(shirt().with_size("M"));
        cart.add_item(shirt().with_size("L"));

        cart.update_quantity(&"4".into(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.items[1].quantity, 1);
    }

    #[test]
    fn test_update_quantity_missing() {
        let mut cart = Cart::new();
        assert_eq!(cart.update_quantity(&"9".into(), 1), QuantityUpdate::NotFound);
    }

    #[test]
    fn test_remove_item_removes_all_lines() {
        let mut cart = Cart::new();
        cart.add_item(shirt().with_size("M"));
        cart.add_item(shirt().with_size("L"));
        cart.add_item(NewCartItem::new("1", "Suit", Money::new(29999)));

        assert!(cart.remove_item(&"4".into()));
        assert_eq!(cart.unique_item_count(), 1);
        assert!(!cart.remove_item(&"4".into()));
    }

    #[test]
    fn test_total() {
        let mut cart = Cart::new();
        assert!(cart.total().is_zero());

        cart.add_item(shirt().with_quantity(2));
        cart.add_item(NewCartItem::new("3", "Scarf", Money::new(8999)));
        assert_eq!(cart.total().amount_cents, 2 * 7999 + 8999);
    }

    #[test]
    fn test_normalize() {
        let mut cart = Cart::new();
        cart.add_item(shirt());
        cart.add_item(NewCartItem::new("3", "Scarf", Money::new(8999)));
        cart.items[0].quantity = 0;
        cart.items[1].quantity = 42;

        assert!(cart.normalize());
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.items[0].quantity, MAX_QUANTITY_PER_ITEM);
        assert!(!cart.normalize());
    }

    #[test]
    fn test_normalize_drops_unusable_prices() {
        let mut cart = Cart::new();
        cart.add_item(shirt());
        cart.add_item(NewCartItem::new("7", "Scarf", Money::new(-5000)));
        cart.add_item(NewCartItem::new("8", "Coat", Money::new(i64::MAX)));
        cart.add_item(NewCartItem::new("9", "Belt", MAX_UNIT_PRICE).with_quantity(10));

        assert!(cart.normalize());
        let ids: Vec<&str> = cart.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "9"]);
    }

    #[test]
    fn test_options_label() {
        let mut cart = Cart::new();
        cart.add_item(shirt().with_size("M").with_color("Blue"));
        cart.add_item(NewCartItem::new("3", "Scarf", Money::new(8999)));

        assert_eq!(cart.items[0].options_label().as_deref(), Some("Size: M, Color: Blue"));
        assert_eq!(cart.items[1].options_label(), None);
    }

    fn product() -> Product {
        Product {
            id: ProductId::new("2"),
            name: "Italian Leather Oxford Shoes".to_string(),
            category: Category::Shoes,
            price: Money::new(19999),
            description: String::new(),
            image: "assets/images/product2.jpg".to_string(),
            images: vec![],
            sizes: Some(vec!["9".into(), "10".into()]),
            colors: Some(vec!["Black".into(), "Brown".into()]),
            in_stock: true,
            rating: 4.6,
            reviews: 35,
        }
    }

    #[test]
    fn test_from_product_snapshots() {
        let item =
            NewCartItem::from_product(&product(), Some("10".into()), Some("Brown".into()), 1)
                .unwrap();
        assert_eq!(item.price.amount_cents, 19999);
        assert_eq!(item.image, "assets/images/product2.jpg");
    }

    #[test]
    fn test_from_product_rejects_unknown_option() {
        let err = NewCartItem::from_product(&product(), Some("14".into()), None, 1).unwrap_err();
        assert!(matches!(err, CommerceError::UnavailableOption { option: "size", .. }));

        let err = NewCartItem::from_product(&product(), None, Some("Red".into()), 1).unwrap_err();
        assert!(matches!(err, CommerceError::UnavailableOption { option: "color", .. }));
    }

    #[test]
    fn test_from_product_rejects_out_of_stock_and_large_quantity() {
        let mut p = product();
        assert!(matches!(
            NewCartItem::from_product(&p, None, None, 11),
            Err(CommerceError::InvalidQuantity(11))
        ));

        p.in_stock = false;
        assert!(matches!(
            NewCartItem::from_product(&p, None, None, 1),
            Err(CommerceError::OutOfStock(_))
        ));
    }

    #[test]
    fn test_record_shape() {
        let mut cart = Cart::new();
        cart.add_item(shirt().with_size("M"));
        let value = serde_json::to_value(&cart).unwrap();

        assert!(value.get("updatedAt").is_some());
        let item = &value["items"][0];
        assert_eq!(item["id"], "4");
        assert_eq!(item["price"], 79.99);
        assert_eq!(item["size"], "M");
        assert!(item["color"].is_null());
        assert!(item.get("addedAt").is_some());
    }
}
