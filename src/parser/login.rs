//! Parser for stored credentials.

use super::{EntityParser, text};
use crate::db::types::{Params, Row, Value};
use crate::error::DbResult;
use crate::models::Login;

/// Insert: `userId, passwordHash, salt`. Update: `passwordHash, salt, userId`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoginParser;

impl EntityParser for LoginParser {
    type Entity = Login;
    const ENTITY: &'static str = "login";

    fn parse(&self, row: &Row) -> DbResult<Login> {
        Ok(Login {
            user_id: text(row, "userId")?,
            password_hash: text(row, "passwordHash")?,
            salt: text(row, "salt")?,
        })
    }

    fn serialize(&self, login: &Login) -> DbResult<Row> {
        Ok(Row::new()
            .with("userId", login.user_id.as_str())
            .with("passwordHash", login.password_hash.as_str())
            .with("salt", login.salt.as_str()))
    }

    fn to_insert_params(&self, login: &Login) -> DbResult<Params> {
        Ok(vec![
            Value::from(login.user_id.as_str()),
            Value::from(login.password_hash.as_str()),
            Value::from(login.salt.as_str()),
        ])
    }

    fn to_update_params(&self, login: &Login) -> DbResult<Params> {
        Ok(vec![
            Value::from(login.password_hash.as_str()),
            Value::from(login.salt.as_str()),
            Value::from(login.user_id.as_str()),
        ])
    }
}
