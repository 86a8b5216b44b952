//! Stored credentials. Hashing happens before a [`Login`] is built.

use super::{Validate, ValidationResult, check_id, check_not_blank};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Login {
    pub user_id: String,
    pub password_hash: String,
    pub salt: String,
}

impl Login {
    pub fn new(
        user_id: impl Into<String>,
        password_hash: impl Into<String>,
        salt: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            password_hash: password_hash.into(),
            salt: salt.into(),
        }
    }
}

// Keep hashes and salts out of logs.
impl std::fmt::Debug for Login {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Login")
            .field("user_id", &self.user_id)
            .field("password_hash", &"<redacted>")
            .field("salt", &"<redacted>")
            .finish()
    }
}

impl Validate for Login {
    fn validate_basic(&self) -> ValidationResult {
        check_id("user id", &self.user_id)?;
        check_not_blank("password hash", &self.password_hash)?;
        check_not_blank("salt", &self.salt)
    }
}
