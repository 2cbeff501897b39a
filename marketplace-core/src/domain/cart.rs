//! Shopping cart domain model
//!
//! The cart only lives for the running session. Items are copies of the
//! displayed name and price; there is no quantity, stock, or link back to
//! the product document.

use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use super::product::Product;

/// Everything that is not a digit or a dot gets stripped before summing
fn non_numeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9.]").expect("static regex is valid"))
}

/// Parse a display price the way the cart total does.
///
/// "₹1,299.00" -> 1299.00. Strings that still don't parse after cleanup
/// (e.g. "1.2.3" or "free") contribute nothing. Digit runs too long for an
/// exact `Decimal` go through `f64`; magnitudes beyond `Decimal::MAX`
/// (about 7.9e28) cannot be totaled and also contribute nothing.
pub fn parse_display_price(price: &str) -> Option<Decimal> {
    let cleaned = non_numeric().replace_all(price, "");
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok().or_else(|| {
        cleaned
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .and_then(Decimal::from_f64)
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    pub name: String,
    pub price: String,
}

impl CartItem {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }
}

impl From<&Product> for CartItem {
    fn from(product: &Product) -> Self {
        Self::new(product.name.clone(), product.price.display())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: CartItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all parseable item prices
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .filter_map(|item| parse_display_price(&item.price))
            .sum()
    }

    /// Mock checkout: hand back a receipt and empty the cart.
    ///
    /// An empty cart still checks out, with no items and a zero total.
    pub fn checkout(&mut self) -> OrderReceipt {
        let total = self.total();
        let items = std::mem::take(&mut self.items);

        OrderReceipt {
            items,
            total,
            placed_at: Utc::now(),
        }
    }
}

/// What the user "ordered". Never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct OrderReceipt {
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub placed_at: DateTime<Utc>,
}
