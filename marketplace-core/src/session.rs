//! Marketplace session - state behind the screen shown after login
//!
//! Holds the signed-in user, the products currently on screen and the
//! cart. Everything here is dropped when the session ends.

use crate::domain::result::{Error, Result};
use crate::domain::{Cart, CartItem, OrderReceipt, Product, User};
use crate::services::{CatalogService, SearchResult};

pub struct MarketplaceSession<'a> {
    catalog: &'a CatalogService,
    user: User,
    cart: Cart,
    displayed: Vec<Product>,
}

impl<'a> MarketplaceSession<'a> {
    pub fn new(catalog: &'a CatalogService, user: User) -> Self {
        Self {
            catalog,
            user,
            cart: Cart::new(),
            displayed: Vec::new(),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn categories(&self) -> Result<Vec<String>> {
        self.catalog.categories()
    }

    /// Replace the displayed products with one category
    pub fn show_category(&mut self, category: &str) -> Result<&[Product]> {
        self.displayed = self.catalog.products_in_category(category)?;
        Ok(&self.displayed)
    }

    /// Replace the displayed products with search results.
    ///
    /// An empty keyword is rejected and leaves the current products on screen.
    pub fn search(&mut self, keyword: &str) -> Result<SearchResult> {
        let result = self.catalog.search(keyword)?;
        self.displayed = result.products.clone();
        Ok(result)
    }

    pub fn displayed(&self) -> &[Product] {
        &self.displayed
    }

    /// Copy a displayed product's name and price into the cart
    pub fn add_to_cart(&mut self, index: usize) -> Result<CartItem> {
        let product = self
            .displayed
            .get(index)
            .ok_or_else(|| Error::not_found(format!("No product at position {}", index + 1)))?;

        let item = CartItem::from(product);
        self.cart.add(item.clone());
        Ok(item)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn place_order(&mut self) -> OrderReceipt {
        self.cart.checkout()
    }
}
