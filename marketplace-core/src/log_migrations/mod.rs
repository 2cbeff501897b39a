//! Migrations for logs.duckdb
//!
//! Kept apart from the collection migrations so the event log can be
//! exported or wiped without touching users and products.

pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    ("001_initial_schema.sql", include_str!("001_initial_schema.sql")),
];
