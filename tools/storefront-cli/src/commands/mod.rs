//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod products;

use clap::{Args, Subcommand};
use storefront_commerce::catalog::Category;
use storefront_commerce::search::SortOption;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only show one category (clothing, shoes, accessories).
    #[arg(short, long)]
    pub category: Option<Category>,

    /// Match name, description or category.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort order (featured, price-asc, price-desc, name-asc, rating).
    #[arg(long, default_value = "featured")]
    pub sort: SortOption,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart and its totals.
    Show,
    /// Add a product to the cart.
    Add {
        /// Product ID.
        id: String,

        /// Size, if the product is sized.
        #[arg(short, long)]
        size: Option<String>,

        /// Color, if the product comes in several.
        #[arg(short, long)]
        color: Option<String>,

        /// Units to add.
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Remove every line for a product.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Change a line's quantity by a delta; dropping below 1 removes it.
    Update {
        /// Product ID.
        id: String,

        /// Change in quantity, e.g. 1 or -1.
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Read the shipping form from a TOML or JSON file instead of prompting.
    #[arg(short, long)]
    pub form: Option<String>,

    /// Payment method to record on the order.
    #[arg(long)]
    pub payment_method: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}
