//! Adapter implementations
//!
//! - DuckDB for the DocumentStore port
//! - Demo catalog used by demo mode and `mkt seed`

pub mod demo;
pub mod duckdb;
