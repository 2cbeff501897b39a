//! Import service - load product documents into the catalog
//!
//! Accepted inputs:
//! - `.json`: an array of product documents (or a single document)
//! - `.ndjson` / `.jsonl`: one document per line
//! - `.csv`: headers `name`, `price`, `category` (any order, case-insensitive)
//!
//! Only `name`, `price` and `category` are kept from each document.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::domain::result::{Error, Result};
use crate::domain::{Price, Product};
use crate::ports::DocumentStore;

/// Input format, usually picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Ndjson,
    Csv,
}

impl ImportFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            "csv" => Ok(Self::Csv),
            _ => Err(Error::validation(format!(
                "Unsupported file type '{}'. Use .json, .ndjson or .csv",
                path.display()
            ))),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
    pub warnings: Vec<String>,
}

/// Import service for product documents
pub struct ImportService {
    store: Arc<dyn DocumentStore>,
}

impl ImportService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Parse a file into products without touching the store
    pub fn preview(&self, path: &Path) -> Result<(Vec<Product>, Vec<String>)> {
        let format = ImportFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        parse_products(&content, format)
    }

    /// Parse a file and insert every valid product
    pub fn import_file(&self, path: &Path) -> Result<ImportResult> {
        let (products, warnings) = self.preview(path)?;
        self.insert_all(&products, warnings)
    }

    /// Insert already-parsed products; documents that fail are counted as skipped
    pub fn insert_all(&self, products: &[Product], mut warnings: Vec<String>) -> Result<ImportResult> {
        let mut imported = 0;

        for product in products {
            match self.store.insert_product(product) {
                Ok(()) => imported += 1,
                Err(e) => warnings.push(format!("'{}' not imported: {}", product.name, e)),
            }
        }

        // One warning per skipped document
        Ok(ImportResult {
            imported,
            skipped: warnings.len(),
            warnings,
        })
    }
}

/// Parse document text in the given format.
///
/// Returns the products plus one warning per skipped document.
pub fn parse_products(content: &str, format: ImportFormat) -> Result<(Vec<Product>, Vec<String>)> {
    match format {
        ImportFormat::Json => {
            let value: JsonValue = serde_json::from_str(content)?;
            let docs = match value {
                JsonValue::Array(items) => items,
                doc @ JsonValue::Object(_) => vec![doc],
                _ => {
                    return Err(Error::validation(
                        "JSON import must be an array of product documents",
                    ))
                }
            };
            Ok(collect_documents(docs.iter().enumerate().map(|(i, d)| (i + 1, d.clone()))))
        }
        ImportFormat::Ndjson => {
            let mut docs = Vec::new();
            let mut warnings = Vec::new();
            for (i, line) in content.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match serde_json::from_str::<JsonValue>(line) {
                    Ok(doc) => docs.push((i + 1, doc)),
                    Err(e) => warnings.push(format!("line {}: invalid JSON ({})", i + 1, e)),
                }
            }
            let (products, mut doc_warnings) = collect_documents(docs.into_iter());
            warnings.append(&mut doc_warnings);
            Ok((products, warnings))
        }
        ImportFormat::Csv => parse_csv(content),
    }
}

fn collect_documents(docs: impl Iterator<Item = (usize, JsonValue)>) -> (Vec<Product>, Vec<String>) {
    let mut products = Vec::new();
    let mut warnings = Vec::new();

    for (position, doc) in docs {
        match Product::from_document(&doc) {
            Some(product) => products.push(product),
            None => warnings.push(format!("document {}: missing name", position)),
        }
    }

    (products, warnings)
}

fn parse_csv(content: &str) -> Result<(Vec<Product>, Vec<String>)> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();

    let find = |column: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(column));
    let name_idx = find("name")
        .ok_or_else(|| Error::validation("CSV import needs a 'name' column"))?;
    let price_idx = find("price");
    let category_idx = find("category");

    let mut products = Vec::new();
    let mut warnings = Vec::new();

    for (i, record) in reader.records().enumerate() {
        // Header is line 1
        let line = i + 2;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                warnings.push(format!("line {}: {}", line, e));
                continue;
            }
        };

        let name = record.get(name_idx).unwrap_or("").trim();
        if name.is_empty() {
            warnings.push(format!("line {}: missing name", line));
            continue;
        }

        let price = price_idx
            .and_then(|idx| record.get(idx))
            .map(Price::parse_input)
            .unwrap_or(Price::Missing);
        let category = category_idx
            .and_then(|idx| record.get(idx))
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        products.push(Product::new(name, price, category));
    }

    Ok((products, warnings))
}
