//! Demo catalog
//!
//! Sample documents for demo mode and first-run exploration. Prices mix
//! numbers and strings on purpose: real collections do too.

use rust_decimal::Decimal;

use crate::domain::{Price, Product};

/// Username and password of the demo account
pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_PASSWORD: &str = "demo";

fn number(units: i64, scale: u32) -> Price {
    Price::Number(Decimal::new(units, scale))
}

fn text(s: &str) -> Price {
    Price::Text(s.to_string())
}

/// Generate the demo product documents
pub fn generate_demo_products() -> Vec<Product> {
    let rows: Vec<(&str, Price, &str)> = vec![
        // Electronics
        ("Smartphone X2", number(1899900, 2), "Electronics"),
        ("Wireless Earbuds", number(249900, 2), "Electronics"),
        ("USB-C Charger 30W", text("₹1,199"), "Electronics"),
        ("Bluetooth Speaker", number(3499, 0), "Electronics"),
        ("Laptop Stand", number(129950, 2), "Electronics"),
        // Books
        ("The Rust Programming Language", number(289900, 2), "Books"),
        ("Clean Architecture", number(62500, 2), "Books"),
        ("Poetry Collection (Used)", text("150"), "Books"),
        // Clothing
        ("Cotton T-Shirt", number(49900, 2), "Clothing"),
        ("Denim Jacket", number(2799, 0), "Clothing"),
        ("Running Shoes", text("₹3,450.00"), "Clothing"),
        ("Wool Socks (3 pairs)", number(59900, 2), "Clothing"),
        // Home
        ("Ceramic Coffee Mug", number(34900, 2), "Home"),
        ("LED Desk Lamp", number(149900, 2), "Home"),
        ("Cast Iron Skillet", number(1850, 0), "Home"),
        ("Handmade Rug", text("Price on request"), "Home"),
        // Grocery
        ("Darjeeling Tea 250g", number(42000, 2), "Grocery"),
        ("Basmati Rice 5kg", number(78900, 2), "Grocery"),
        ("Organic Honey", text("₹350"), "Grocery"),
    ];

    rows.into_iter()
        .map(|(name, price, category)| Product::new(name, price, Some(category.to_string())))
        .collect()
}
