//! Catalog service - category buttons, keyword search, product listing

use std::sync::Arc;

use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::domain::{Price, Product};
use crate::ports::DocumentStore;

/// Catalog service for the marketplace screen
pub struct CatalogService {
    store: Arc<dyn DocumentStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Distinct categories, one per category button
    pub fn categories(&self) -> Result<Vec<String>> {
        Ok(self.store.categories()?)
    }

    pub fn products_in_category(&self, category: &str) -> Result<Vec<Product>> {
        Ok(self.store.products_by_category(category)?)
    }

    pub fn all_products(&self) -> Result<Vec<Product>> {
        Ok(self.store.list_products()?)
    }

    /// Case-insensitive name search
    ///
    /// An empty keyword is rejected; an empty result is not an error.
    pub fn search(&self, keyword: &str) -> Result<SearchResult> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(Error::validation("Please enter a product name to search."));
        }

        let products = self.store.search_products_by_name(keyword)?;
        Ok(SearchResult {
            keyword: keyword.to_string(),
            products,
        })
    }

    /// Add a single product document
    pub fn add_product(&self, name: &str, price: Price, category: Option<&str>) -> Result<Product> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("Product name cannot be empty."));
        }
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let product = Product::new(name, price, category);
        self.store.insert_product(&product)?;
        Ok(product)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub keyword: String,
    pub products: Vec<Product>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Shown in place of product cards when nothing matched
    pub fn empty_message(&self) -> String {
        format!("No products found for: {}", self.keyword)
    }
}
