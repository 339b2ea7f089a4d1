//! Catalog browsing commands.

use anyhow::{bail, Result};
use console::style;
use storefront_commerce::search::{SearchQuery, SortOption};

use super::{ProductArgs, ProductsArgs};
use crate::context::Context;
use crate::output::{rating_line, stock_badge};

/// List products matching the filters.
pub async fn list(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    let mut query = SearchQuery::new().with_sort(args.sort);
    if let Some(text) = &args.search {
        query = query.with_text(text.as_str());
    }
    if let Some(category) = args.category {
        query = query.with_category(category);
    }

    let pb = ctx.output.spinner();
    ctx.output.start_spinner(&pb, "Loading products...");
    let products = query.apply(&catalog.list_products().await);
    pb.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    let title = match args.category {
        Some(category) => category.display_name().to_string(),
        None => "All Products".to_string(),
    };
    ctx.output.header(&title);

    if products.is_empty() {
        ctx.output.info("No products match your search.");
        return Ok(());
    }

    if args.sort != SortOption::Featured {
        ctx.output.info(&format!("Sorted by {}", args.sort.display_name()));
    }

    ctx.output.table_row(&["ID", "NAME", "PRICE", "RATING"], &[4, 32, 10, 6]);
    for product in &products {
        let price = product.price.to_string();
        let rating = format!("{:.1}", product.rating);
        let name = if product.in_stock {
            product.name.clone()
        } else {
            format!("{} (sold out)", product.name)
        };
        ctx.output.table_row(
            &[product.id.as_str(), &name, &price, &rating],
            &[4, 32, 10, 6],
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!("{} product(s)", products.len()));

    Ok(())
}

/// Show one product.
pub async fn show(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    let Some(product) = catalog.get_product(&args.id.as_str().into()).await else {
        bail!("Product '{}' not found", args.id);
    };

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    if product.is_premium() {
        println!("  {}", style("Premium").magenta().bold());
    }
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Category", product.category.display_name());
    ctx.output.kv("Price", &product.price.to_string());
    ctx.output.kv("Rating", &rating_line(&product));
    ctx.output.kv("Stock", &stock_badge(&product));
    if let Some(sizes) = &product.sizes {
        ctx.output.kv("Sizes", &sizes.join(", "));
    }
    if let Some(colors) = &product.colors {
        ctx.output.kv("Colors", &colors.join(", "));
    }

    ctx.output.info("");
    println!("  {}", product.description);

    if product.images.len() > 1 {
        ctx.output.info("");
        ctx.output.info("Images:");
        for image in &product.images {
            ctx.output.list_item(image);
        }
    }

    Ok(())
}
