//! Status service - collection summaries

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use crate::adapters::duckdb::DuckDbStore;
use crate::ports::DocumentStore;

/// Status service for collection summaries
pub struct StatusService {
    store: Arc<DuckDbStore>,
}

impl StatusService {
    pub fn new(store: Arc<DuckDbStore>) -> Self {
        Self { store }
    }

    pub fn get_status(&self) -> Result<StatusSummary> {
        let categories = self.store.categories()?;

        Ok(StatusSummary {
            total_users: self.store.count_users()?,
            total_products: self.store.count_products()?,
            total_categories: categories.len() as i64,
            categories,
            db_size_bytes: self.store.get_db_size()?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub total_users: i64,
    pub total_products: i64,
    pub total_categories: i64,
    pub categories: Vec<String>,
    pub db_size_bytes: u64,
}
