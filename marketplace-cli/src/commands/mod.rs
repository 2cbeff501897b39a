//! CLI command implementations

pub mod account;
pub mod catalog;
pub mod demo;
pub mod doctor;
pub mod import;
pub mod logs;
pub mod shop;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};
use marketplace_core::{EntryPoint, LogEvent, LoggingService, MarketplaceContext};

/// Get the logging service for the given entry point
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger(entry_point: EntryPoint) -> Option<LoggingService> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok()?;
    LoggingService::new(&data_dir, entry_point, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the data directory from environment or default
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MARKETPLACE_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".marketplace"))
        .unwrap_or_else(|| PathBuf::from(".marketplace"))
}

/// Open the marketplace context for the configured mode
pub fn get_context() -> Result<MarketplaceContext> {
    let data_dir = get_data_dir();

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;

    MarketplaceContext::new(&data_dir).context("Failed to initialize marketplace context")
}
