//! DAO for stored credentials.

use super::{Key, LoginDao};
use crate::db::types::Value;
use crate::error::DbResult;
use crate::models::Login;

const LOGIN_INSERT: &str = "INSERT INTO Logins (userId, passwordHash, salt) VALUES (?, ?, ?)";
const LOGIN_UPDATE: &str = "UPDATE Logins SET passwordHash = ?, salt = ? WHERE userId = ?";
const LOGIN_DELETE: &str = "DELETE FROM Logins WHERE userId = ?";

impl LoginDao {
    /// Stores an already-hashed credential for an existing user.
    pub fn add(&self, login: &Login) -> DbResult<()> {
        self.insert(LOGIN_INSERT, login)
    }

    pub fn update(&self, login: &Login) -> DbResult<()> {
        self.update_existing(LOGIN_UPDATE, login, Key(&[login.user_id.as_str()]))
    }

    pub fn remove(&self, user_id: &str) -> DbResult<()> {
        self.write_one(LOGIN_DELETE, &[Value::from(user_id)], Key(&[user_id]))
    }

    pub fn get_by_id(&self, user_id: &str) -> DbResult<Login> {
        self.fetch_one(
            "SELECT userId, passwordHash, salt FROM Logins WHERE userId = ?",
            &[Value::from(user_id)],
            Key(&[user_id]),
        )
    }

    pub fn exists(&self, user_id: &str) -> DbResult<bool> {
        self.probe(
            "SELECT 1 FROM Logins WHERE userId = ? LIMIT 1",
            &[Value::from(user_id)],
        )
    }
}
