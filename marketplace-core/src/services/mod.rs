//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and the document store. Each service
//! covers one screen or maintenance task.

pub mod auth;
mod catalog;
pub mod demo;
mod doctor;
pub mod import;
pub mod logging;
pub mod migration;
mod status;

pub use auth::AuthService;
pub use catalog::{CatalogService, SearchResult};
pub use demo::{DemoService, SeedResult};
pub use doctor::{CheckResult, DoctorResult, DoctorService};
pub use import::{ImportFormat, ImportResult, ImportService};
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use migration::{MigrationResult, MigrationService};
pub use status::{StatusService, StatusSummary};
