//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use serde::Serialize;
use storefront_cache::KeyValueStore;
use storefront_commerce::cart::{
    Cart, CartStore, CartSummary, QuantityUpdate, FREE_SHIPPING_THRESHOLD, MAX_QUANTITY_PER_ITEM,
};
use storefront_commerce::ProductId;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart()?;

    match args.command {
        Some(CartCommand::Show) | None => {}
        Some(CartCommand::Add {
            id,
            size,
            color,
            quantity,
        }) => {
            let catalog = ctx.catalog()?;
            let id = ProductId::new(id);
            let added = cart
                .add_from_catalog(catalog.as_ref(), &id, size, color, quantity)
                .await?;
            if let Some(item) = cart.cart().get_item(&id) {
                ctx.output.success(&format!("{} added to cart", item.name));
            }
            if added.is_capped() {
                ctx.output.warn(&format!(
                    "At most {} of an item per order; {} not added",
                    MAX_QUANTITY_PER_ITEM, added.dropped
                ));
            }
        }
        Some(CartCommand::Remove { id }) => {
            let id = ProductId::new(id);
            let Some(item) = cart.cart().get_item(&id) else {
                bail!("Product '{}' is not in the cart", id);
            };
            let name = item.name.clone();
            cart.remove_item(&id);
            ctx.output.success(&format!("{} removed from cart", name));
        }
        Some(CartCommand::Update { id, delta }) => {
            let id = ProductId::new(id);
            match cart.update_quantity(&id, delta) {
                QuantityUpdate::Set(quantity) => {
                    ctx.output.success(&format!("Quantity set to {}", quantity))
                }
                QuantityUpdate::Removed => ctx.output.success("Item removed from cart"),
                QuantityUpdate::Ignored => ctx.output.warn(&format!(
                    "At most {} of an item per order",
                    MAX_QUANTITY_PER_ITEM
                )),
                QuantityUpdate::NotFound => bail!("Product '{}' is not in the cart", id),
            }
        }
        Some(CartCommand::Clear { yes }) => {
            if cart.is_empty() {
                ctx.output.info("Your cart is already empty.");
                return Ok(());
            }
            if !yes && ctx.output.is_interactive() {
                let confirmed = Confirm::new()
                    .with_prompt("Remove everything from the cart?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    ctx.output.warn("Cart left unchanged");
                    return Ok(());
                }
            }
            cart.clear_cart();
            ctx.output.success("Cart cleared");
            return Ok(());
        }
    }

    show(&cart, ctx);
    Ok(())
}

#[derive(Serialize)]
struct CartView<'a> {
    #[serde(flatten)]
    cart: &'a Cart,
    summary: CartSummary,
}

/// Print the cart with its order summary.
pub fn show<S: KeyValueStore>(cart: &CartStore<S>, ctx: &Context) {
    let summary = cart.summary();

    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            cart: cart.cart(),
            summary,
        });
        return;
    }

    ctx.output.header("Shopping Cart");

    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    let widths = [4, 32, 24, 4, 10];
    ctx.output.table_row(&["ID", "ITEM", "OPTIONS", "QTY", "TOTAL"], &widths);
    for item in &cart.cart().items {
        let options = item.options_label().unwrap_or_default();
        let quantity = item.quantity.to_string();
        let line_total = item.line_total().to_string();
        ctx.output.table_row(
            &[item.id.as_str(), &item.name, &options, &quantity, &line_total],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.kv("Items", &summary.item_count.to_string());
    ctx.output.kv("Subtotal", &summary.subtotal.to_string());
    if summary.free_shipping() {
        ctx.output.kv("Shipping", "Free");
    } else {
        ctx.output.kv("Shipping", &summary.shipping.to_string());
    }
    ctx.output.kv("Tax", &summary.tax.to_string());
    ctx.output.kv("Total", &summary.total.to_string());

    if !summary.free_shipping() {
        ctx.output.info(&format!(
            "Free shipping on orders over {}",
            FREE_SHIPPING_THRESHOLD
        ));
    }
}
