//! Auth service - login and registration against the users collection

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{Credentials, User};
use crate::ports::DocumentStore;

/// Auth service for the login and register screens
pub struct AuthService {
    store: Arc<dyn DocumentStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Find the user whose stored username and password both equal the typed ones
    ///
    /// Returns `Error::InvalidCredentials` for an unknown username or a
    /// wrong password; the two cases are indistinguishable to the caller.
    pub fn login(&self, credentials: &Credentials) -> Result<User> {
        self.store
            .find_user(&credentials.username, &credentials.password)?
            .ok_or(Error::InvalidCredentials)
    }

    /// Create a new user. The password is stored exactly as typed.
    ///
    /// The duplicate check and the insert are two separate queries; with a
    /// single user at the keyboard that window is never hit.
    pub fn register(&self, credentials: &Credentials) -> Result<User> {
        credentials.validate_for_registration()?;

        if self.store.find_user_by_username(&credentials.username)?.is_some() {
            return Err(Error::conflict("Username already exists."));
        }

        let user = User::new(credentials.username.clone(), credentials.password.clone());
        self.store.insert_user(&user)?;

        Ok(user)
    }
}
