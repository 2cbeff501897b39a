//! Catalog commands - categories, product listings, search and product add

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use marketplace_core::{EntryPoint, LogEvent, Price};

use super::{get_context, get_logger, log_event};
use crate::output;

#[derive(Subcommand)]
pub enum ProductCommands {
    /// Add a product to the catalog
    Add {
        /// Product name
        #[arg(long)]
        name: String,
        /// Price; numeric values are stored as numbers, anything else as text
        #[arg(long)]
        price: String,
        /// Category
        #[arg(long)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn categories(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let categories = ctx.catalog_service.categories()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    if categories.is_empty() {
        output::warning("No categories yet. Run 'mkt seed' or 'mkt import' to add products.");
        return Ok(());
    }

    println!("{}", "Categories".bold());
    for category in &categories {
        println!("  • {}", category);
    }

    Ok(())
}

pub fn products(category: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let products = match category {
        Some(c) => ctx.catalog_service.products_in_category(c)?,
        None => ctx.catalog_service.all_products()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
        return Ok(());
    }

    if products.is_empty() {
        match category {
            Some(c) => output::warning(&format!("No products in category: {}", c)),
            None => output::warning("No products yet."),
        }
        return Ok(());
    }

    println!("{}", output::product_table(&products, &ctx.config));
    println!("{} product(s)", products.len());

    Ok(())
}

pub fn search(keyword: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger(EntryPoint::Cli);
    // The keyword itself stays out of the log
    log_event(&logger, LogEvent::new("search").with_command("search"));

    let result = ctx.catalog_service.search(keyword)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result.products)?);
        return Ok(());
    }

    if result.is_empty() {
        output::warning(&result.empty_message());
        return Ok(());
    }

    println!("{}", output::product_table(&result.products, &ctx.config));
    Ok(())
}

pub fn run(command: ProductCommands) -> Result<()> {
    match command {
        ProductCommands::Add { name, price, category, json } => {
            let ctx = get_context()?;
            let product = ctx.catalog_service.add_product(
                &name,
                Price::parse_input(&price),
                category.as_deref(),
            )?;

            let logger = get_logger(EntryPoint::Cli);
            log_event(&logger, LogEvent::new("product_added").with_command("product add"));

            if json {
                println!("{}", serde_json::to_string_pretty(&product)?);
            } else {
                println!("{}", "Product added".green());
                println!("  Name: {}", product.name);
                println!("  Price: {}", ctx.config.format_price(&product.price.display()));
                println!("  Category: {}", product.category.as_deref().unwrap_or("-"));
            }
            Ok(())
        }
    }
}
