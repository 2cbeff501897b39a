//! DuckDB document store
//!
//! Each collection is a table. Product prices are kept in a JSON column so a
//! document may carry a number or a string, exactly as it was written.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use duckdb::{params, Connection};
use uuid::Uuid;

use crate::domain::{Price, Product, User};
use crate::ports::DocumentStore;
use crate::services::{MigrationResult, MigrationService};

/// Maximum number of retries when database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

const PRODUCT_COLUMNS: &str =
    "product_id, name, CAST(price AS VARCHAR) AS price, category, created_at";

const USER_COLUMNS: &str = "user_id, username, password, created_at";

/// Check if an error message indicates a file locking issue that should be retried
fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    // Windows
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        // Unix/macOS
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("file is already open")
        || lower.contains("could not set lock on file")
}

/// DuckDB-backed document store
pub struct DuckDbStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl DuckDbStore {
    /// Open (or create) the database file.
    ///
    /// Retries with exponential backoff on file locking errors, which show up
    /// when a second `mkt` process opens the same file at the same moment.
    pub fn new(db_path: &Path) -> Result<Self> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match Self::try_open_connection(db_path) {
                Ok(conn) => {
                    return Ok(Self {
                        conn: Mutex::new(conn),
                        db_path: Some(db_path.to_path_buf()),
                    });
                }
                Err(e) => {
                    let err_msg = e.to_string();
                    if is_retryable_error(&err_msg) && attempt < MAX_RETRIES - 1 {
                        let delay =
                            Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt));
                        eprintln!(
                            "[mkt] Database busy, retrying in {}ms (attempt {}/{}): {}",
                            delay.as_millis(),
                            attempt + 1,
                            MAX_RETRIES,
                            err_msg
                        );
                        thread::sleep(delay);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow!("Failed to open database after {} retries", MAX_RETRIES)))
    }

    /// Throwaway store for tests and previews
    pub fn open_in_memory() -> Result<Self> {
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        let conn = Connection::open_in_memory_with_flags(config)?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path: None,
        })
    }

    fn try_open_connection(db_path: &Path) -> Result<Connection> {
        // Autoloading would pull cached extensions from ~/.duckdb; JSON is
        // compiled in through the "json" feature.
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        Ok(Connection::open_with_flags(db_path, config)?)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))
    }

    /// Run database migrations using the MigrationService
    pub fn run_migrations(&self) -> Result<MigrationResult> {
        let conn = self.conn()?;
        MigrationService::new(&conn).run_pending()
    }

    /// Ensure database schema exists (runs pending migrations)
    pub fn ensure_schema(&self) -> Result<()> {
        self.run_migrations()?;
        Ok(())
    }

    /// Size of the database file on disk (0 for in-memory stores)
    pub fn get_db_size(&self) -> Result<u64> {
        match &self.db_path {
            Some(path) => Ok(std::fs::metadata(path)?.len()),
            None => Ok(0),
        }
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn query_products(&self, sql: &str, args: &[&dyn duckdb::ToSql]) -> Result<Vec<Product>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(args, |row| Ok(row_to_product(row)))?;

        let mut products = Vec::new();
        for product in rows {
            products.push(product?);
        }
        Ok(products)
    }

    fn query_user(&self, sql: &str, args: &[&dyn duckdb::ToSql]) -> Result<Option<User>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query(args)?;

        match rows.next()? {
            Some(row) => Ok(Some(row_to_user(row))),
            None => Ok(None),
        }
    }

    fn query_strings(&self, sql: &str) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let values = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(values)
    }
}

impl DocumentStore for DuckDbStore {
    fn find_user(&self, username: &str, password: &str) -> Result<Option<User>> {
        self.query_user(
            &format!(
                "SELECT {} FROM users WHERE username = ? AND password = ? ORDER BY rowid LIMIT 1",
                USER_COLUMNS
            ),
            &[&username, &password],
        )
    }

    fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.query_user(
            &format!(
                "SELECT {} FROM users WHERE username = ? ORDER BY rowid LIMIT 1",
                USER_COLUMNS
            ),
            &[&username],
        )
    }

    fn insert_user(&self, user: &User) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (user_id, username, password, created_at) VALUES (?, ?, ?, ?)",
            params![
                user.id.to_string(),
                user.username,
                user.password,
                user.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn count_users(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }

    fn list_products(&self) -> Result<Vec<Product>> {
        self.query_products(
            &format!("SELECT {} FROM products ORDER BY rowid", PRODUCT_COLUMNS),
            &[],
        )
    }

    fn products_by_category(&self, category: &str) -> Result<Vec<Product>> {
        self.query_products(
            &format!(
                "SELECT {} FROM products WHERE category = ? ORDER BY rowid",
                PRODUCT_COLUMNS
            ),
            &[&category],
        )
    }

    fn search_products_by_name(&self, keyword: &str) -> Result<Vec<Product>> {
        // contains() is a literal match, so % and _ in the keyword are not wildcards
        self.query_products(
            &format!(
                "SELECT {} FROM products WHERE contains(lower(name), lower(?)) ORDER BY rowid",
                PRODUCT_COLUMNS
            ),
            &[&keyword],
        )
    }

    fn categories(&self) -> Result<Vec<String>> {
        self.query_strings(
            "SELECT DISTINCT category FROM products WHERE category IS NOT NULL ORDER BY category",
        )
    }

    fn insert_product(&self, product: &Product) -> Result<()> {
        let conn = self.conn()?;
        let price_json = product.price.to_json().to_string();
        conn.execute(
            "INSERT INTO products (product_id, name, price, category, created_at)
             VALUES (?, ?, CAST(? AS JSON), ?, ?)",
            params![
                product.id.to_string(),
                product.name,
                price_json,
                product.category,
                product.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn count_products(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok(count)
    }

    fn duplicate_usernames(&self) -> Result<Vec<String>> {
        self.query_strings(
            "SELECT username FROM users GROUP BY username HAVING COUNT(*) > 1 ORDER BY username",
        )
    }

    fn products_missing_category(&self) -> Result<Vec<String>> {
        self.query_strings(
            "SELECT name FROM products WHERE category IS NULL OR trim(category) = '' ORDER BY rowid",
        )
    }
}

fn row_to_user(row: &duckdb::Row) -> User {
    // 0: user_id, 1: username, 2: password, 3: created_at
    let id_str: String = row.get(0).unwrap_or_default();
    let created_str: String = row.get(3).unwrap_or_default();

    User {
        id: Uuid::parse_str(&id_str).unwrap_or_else(|_| Uuid::new_v4()),
        username: row.get(1).unwrap_or_default(),
        password: row.get(2).unwrap_or_default(),
        created_at: parse_timestamp(&created_str),
    }
}

fn row_to_product(row: &duckdb::Row) -> Product {
    // 0: product_id, 1: name, 2: price (JSON text), 3: category, 4: created_at
    let id_str: String = row.get(0).unwrap_or_default();
    let price_json: Option<String> = row.get::<_, Option<String>>(2).ok().flatten();
    let created_str: String = row.get(4).unwrap_or_default();

    Product {
        id: Uuid::parse_str(&id_str).unwrap_or_else(|_| Uuid::new_v4()),
        name: row.get(1).unwrap_or_default(),
        price: parse_price_column(price_json.as_deref()),
        category: row.get::<_, Option<String>>(3).ok().flatten(),
        created_at: parse_timestamp(&created_str),
    }
}

/// Decode the JSON text of the price column. Malformed values count as missing.
fn parse_price_column(raw: Option<&str>) -> Price {
    raw.and_then(|s| serde_json::from_str::<serde_json::Value>(s).ok())
        .map(|v| Price::from_json(&v))
        .unwrap_or(Price::Missing)
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
