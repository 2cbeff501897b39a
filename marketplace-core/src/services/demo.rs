//! Demo service - manage demo mode
//!
//! Demo mode switches to a separate demo.duckdb seeded with a sample
//! catalog and a `demo`/`demo` account, so the screens can be explored
//! without touching the real collections.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::adapters::demo::{generate_demo_products, DEMO_PASSWORD, DEMO_USERNAME};
use crate::adapters::duckdb::DuckDbStore;
use crate::config::Config;
use crate::domain::{Credentials, User};
use crate::ports::DocumentStore;

const DEMO_DB: &str = "demo.duckdb";
const DEMO_WAL: &str = "demo.duckdb.wal";

/// Demo service for managing demo mode
pub struct DemoService {
    data_dir: PathBuf,
}

impl DemoService {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
        }
    }

    pub fn is_enabled(&self) -> Result<bool> {
        Ok(Config::load(&self.data_dir)?.demo_mode)
    }

    /// Enable demo mode with a freshly seeded demo database
    pub fn enable(&self) -> Result<()> {
        self.remove_demo_db()?;

        let mut config = Config::load(&self.data_dir).unwrap_or_default();
        config.enable_demo_mode();
        config.save(&self.data_dir)?;

        let store = DuckDbStore::new(&self.data_dir.join(DEMO_DB))?;
        store.ensure_schema()?;
        seed(Arc::new(store))?;

        Ok(())
    }

    /// Disable demo mode, optionally deleting the demo database
    pub fn disable(&self, clean: bool) -> Result<()> {
        let mut config = Config::load(&self.data_dir).unwrap_or_default();
        config.disable_demo_mode();
        config.save(&self.data_dir)?;

        if clean {
            self.remove_demo_db()?;
        }
        Ok(())
    }

    fn remove_demo_db(&self) -> Result<()> {
        for file in [DEMO_DB, DEMO_WAL] {
            let path = self.data_dir.join(file);
            if path.exists() {
                std::fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

/// Insert the demo account and catalog into any store
///
/// Safe to repeat: the account and any product whose name is already in
/// the collection are left alone.
pub fn seed(store: Arc<dyn DocumentStore>) -> Result<SeedResult> {
    let credentials = Credentials::new(DEMO_USERNAME, DEMO_PASSWORD);
    let user_created = if store.find_user_by_username(&credentials.username)?.is_none() {
        store.insert_user(&User::new(credentials.username, credentials.password))?;
        true
    } else {
        false
    };

    let existing: HashSet<String> = store.list_products()?.into_iter().map(|p| p.name).collect();

    let mut products = 0;
    for product in generate_demo_products() {
        if existing.contains(&product.name) {
            continue;
        }
        store.insert_product(&product)?;
        products += 1;
    }

    Ok(SeedResult {
        products,
        user_created,
    })
}

#[derive(Debug)]
pub struct SeedResult {
    pub products: usize,
    pub user_created: bool,
}
