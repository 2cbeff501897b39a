//! Product domain model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// A document in the `products` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: Price,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Price, category: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price,
            category,
            created_at: Utc::now(),
        }
    }

    /// Build a product from a loosely-shaped document (import files, seeds).
    ///
    /// Returns None when the document has no usable `name`.
    pub fn from_document(doc: &JsonValue) -> Option<Self> {
        let name = doc.get("name")?.as_str()?.trim();
        if name.is_empty() {
            return None;
        }
        let price = doc.get("price").map(Price::from_json).unwrap_or(Price::Missing);
        let category = doc
            .get("category")
            .and_then(|c| c.as_str())
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Some(Self::new(name, price, category))
    }
}

/// The stored `price` field. Documents hold either a number or a string,
/// and older ones sometimes neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Price {
    Number(Decimal),
    Text(String),
    Missing,
}

impl Price {
    /// Map a stored JSON value to a price. Anything that is neither a number
    /// nor a string counts as missing.
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Number(n) => {
                let raw = n.to_string();
                Decimal::from_str(&raw)
                    .or_else(|_| Decimal::from_scientific(&raw))
                    .map(Price::Number)
                    .unwrap_or(Price::Missing)
            }
            JsonValue::String(s) => Price::Text(s.clone()),
            _ => Price::Missing,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Price::Number(d) => d
                .normalize()
                .to_string()
                .parse::<serde_json::Number>()
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Price::Text(s) => JsonValue::String(s.clone()),
            Price::Missing => JsonValue::Null,
        }
    }

    /// Interpret user input (CLI flag, CSV cell): numeric text becomes a
    /// number, blank becomes missing, everything else stays text.
    pub fn parse_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Price::Missing;
        }
        match Decimal::from_str(trimmed) {
            Ok(d) => Price::Number(d),
            Err(_) => Price::Text(trimmed.to_string()),
        }
    }

    /// Display string: numbers with two decimals, text verbatim, "0.00" otherwise
    pub fn display(&self) -> String {
        match self {
            Price::Number(d) => {
                let rounded = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                format!("{:.2}", rounded)
            }
            Price::Text(s) => s.clone(),
            Price::Missing => "0.00".to_string(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}
