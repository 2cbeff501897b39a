//! Doctor service - health checks over the document collections
//!
//! The app never enforces constraints at the data layer, so these checks
//! look for the documents that would misbehave on screen.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use serde_json::json;

use crate::ports::DocumentStore;

/// Doctor service for health checks
pub struct DoctorService {
    store: Arc<dyn DocumentStore>,
}

impl DoctorService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Run all health checks
    pub fn run_checks(&self) -> Result<DoctorResult> {
        let mut checks = BTreeMap::new();

        // Usernames are only checked for uniqueness at registration time
        let duplicates = self.store.duplicate_usernames()?;
        checks.insert(
            "duplicate_usernames".to_string(),
            CheckResult::from_findings(
                duplicates.len(),
                "error",
                "All usernames are unique".to_string(),
                format!("{} username(s) appear on more than one user", duplicates.len()),
                // Names only, never passwords
                duplicates.iter().map(|u| json!({ "username": u })).collect(),
            ),
        );

        // Products without a category never show up under a category button
        let uncategorized = self.store.products_missing_category()?;
        checks.insert(
            "uncategorized_products".to_string(),
            CheckResult::from_findings(
                uncategorized.len(),
                "warning",
                "Every product has a category".to_string(),
                format!(
                    "{} product(s) have no category and are only reachable by search",
                    uncategorized.len()
                ),
                uncategorized.iter().map(|n| json!({ "name": n })).collect(),
            ),
        );

        // Prices the cart total will silently skip
        let unsummable: Vec<(String, String)> = self
            .store
            .products_with_unparseable_price()?
            .into_iter()
            .map(|p| {
                let shown = p.price.display();
                (p.name, shown)
            })
            .collect();
        checks.insert(
            "unparseable_prices".to_string(),
            CheckResult::from_findings(
                unsummable.len(),
                "warning",
                "All prices can be totaled".to_string(),
                format!(
                    "{} product(s) have prices that add nothing to a cart total",
                    unsummable.len()
                ),
                unsummable
                    .iter()
                    .map(|(name, price)| json!({ "name": name, "price": price }))
                    .collect(),
            ),
        );

        let errors = checks.values().filter(|c| c.status == "error").count();
        let warnings = checks.values().filter(|c| c.status == "warning").count();

        Ok(DoctorResult {
            checks,
            passed: errors == 0,
            errors,
            warnings,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct DoctorResult {
    pub checks: BTreeMap<String, CheckResult>,
    pub passed: bool,
    pub errors: usize,
    pub warnings: usize,
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<serde_json::Value>>,
}

impl CheckResult {
    fn from_findings(
        count: usize,
        failing_status: &str,
        pass_message: String,
        fail_message: String,
        details: Vec<serde_json::Value>,
    ) -> Self {
        if count == 0 {
            Self {
                status: "pass".to_string(),
                message: pass_message,
                details: None,
            }
        } else {
            Self {
                status: failing_status.to_string(),
                message: fail_message,
                details: Some(details),
            }
        }
    }
}
