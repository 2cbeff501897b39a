//! Core domain entities
//!
//! Users, products and the cart. These are pure data structures with
//! validation logic - no I/O or external dependencies.

pub mod cart;
mod product;
mod user;
pub mod result;

pub use cart::{Cart, CartItem, OrderReceipt};
pub use product::{Price, Product};
pub use user::{Credentials, User};
