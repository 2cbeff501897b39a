//! User domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::result::{Error, Result};

/// A document in the `users` collection
///
/// `password` is kept in cleartext, exactly as typed at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password: password.into(),
            created_at: Utc::now(),
        }
    }
}

/// Username/password pair as typed on the login or register screen
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// The username is trimmed, the password is taken as typed.
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            password: password.to_string(),
        }
    }

    pub fn validate_for_registration(&self) -> Result<()> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(Error::validation("Fields cannot be empty."));
        }
        Ok(())
    }
}
