//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use marketplace_core::config::Config;
use marketplace_core::Product;
use rust_decimal::{Decimal, RoundingStrategy};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Numbered product table with the currency symbol applied
pub fn product_table(products: &[Product], config: &Config) -> Table {
    let mut table = create_table();
    table.set_header(vec!["#", "Name", "Price", "Category"]);

    for (i, product) in products.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            product.name.clone(),
            config.format_price(&product.price.display()),
            product.category.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }

    table
}

/// Cart and order totals always show two decimals, halves rounded away from zero
pub fn format_total(total: Decimal, config: &Config) -> String {
    let rounded = total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    config.format_price(&format!("{:.2}", rounded))
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
