//! Marketplace Core - catalog browsing, sign-in and cart logic
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: Users, products, prices and the cart
//! - **ports**: The `DocumentStore` trait the services depend on
//! - **services**: Auth, catalog, import, demo, status and doctor
//! - **adapters**: The DuckDB document store and the demo catalog
//! - **session**: State of the marketplace screen after login

pub mod adapters;
pub mod config;
pub mod domain;
mod log_migrations;
pub mod migrations;
pub mod ports;
pub mod services;
pub mod session;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use adapters::duckdb::DuckDbStore;
use config::Config;
use ports::DocumentStore;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{Cart, CartItem, Credentials, OrderReceipt, Price, Product, User};
pub use services::{EntryPoint, LogEvent, LoggingService};
pub use session::MarketplaceSession;

/// Main context for marketplace operations
///
/// Holds the open store, the configuration and every service. One context
/// per process; the interactive screens share it.
pub struct MarketplaceContext {
    pub config: Config,
    pub data_dir: PathBuf,
    pub store: Arc<DuckDbStore>,
    pub auth_service: AuthService,
    pub catalog_service: CatalogService,
    pub import_service: ImportService,
    pub status_service: StatusService,
    pub doctor_service: DoctorService,
}

impl MarketplaceContext {
    /// Open the database for the configured mode and build the services
    pub fn new(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;
        let db_path = data_dir.join(config.db_filename());

        let store = Arc::new(DuckDbStore::new(&db_path)?);
        store.ensure_schema()?;

        Ok(Self::with_store(config, data_dir, store))
    }

    /// Build the services around an already open store
    pub fn with_store(config: Config, data_dir: &Path, store: Arc<DuckDbStore>) -> Self {
        let documents: Arc<dyn DocumentStore> = store.clone();

        Self {
            config,
            data_dir: data_dir.to_path_buf(),
            auth_service: AuthService::new(Arc::clone(&documents)),
            catalog_service: CatalogService::new(Arc::clone(&documents)),
            import_service: ImportService::new(Arc::clone(&documents)),
            status_service: StatusService::new(Arc::clone(&store)),
            doctor_service: DoctorService::new(documents),
            store,
        }
    }

    /// Start a marketplace session for a signed-in user
    pub fn session(&self, user: User) -> MarketplaceSession<'_> {
        MarketplaceSession::new(&self.catalog_service, user)
    }

    /// Seed the current database with the demo catalog and account
    pub fn seed_demo_data(&self) -> Result<SeedResult> {
        let documents: Arc<dyn DocumentStore> = self.store.clone();
        demo::seed(documents)
    }
}
