//! Document store port - the `users` and `products` collections

use anyhow::Result;

use crate::domain::cart::parse_display_price;
use crate::domain::{Product, User};

/// Database access used by the services.
///
/// Each call is a single ad-hoc query against one collection. Nothing here
/// is transactional; the app has one user and one thread.
pub trait DocumentStore: Send + Sync {
    // === Users ===

    /// Find a user whose username and stored password both match exactly
    fn find_user(&self, username: &str, password: &str) -> Result<Option<User>>;

    /// Find the first user with this username
    fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    fn insert_user(&self, user: &User) -> Result<()>;

    fn count_users(&self) -> Result<i64>;

    // === Products ===

    fn list_products(&self) -> Result<Vec<Product>>;

    fn products_by_category(&self, category: &str) -> Result<Vec<Product>>;

    /// Case-insensitive substring match on the product name
    fn search_products_by_name(&self, keyword: &str) -> Result<Vec<Product>>;

    /// Distinct non-null categories, sorted
    fn categories(&self) -> Result<Vec<String>>;

    fn insert_product(&self, product: &Product) -> Result<()>;

    fn count_products(&self) -> Result<i64>;

    // === Health checks ===

    /// Usernames that appear on more than one document
    fn duplicate_usernames(&self) -> Result<Vec<String>>;

    /// Names of products that have no category
    fn products_missing_category(&self) -> Result<Vec<String>>;

    /// Products whose display price adds nothing to a cart total
    fn products_with_unparseable_price(&self) -> Result<Vec<Product>> {
        Ok(self
            .list_products()?
            .into_iter()
            .filter(|p| parse_display_price(&p.price.display()).is_none())
            .collect())
    }
}
