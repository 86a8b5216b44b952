//! Parameter binding for prepared statements.
//!
//! Binds [`Value`]s positionally to a sqlx SQLite query. Every variant has an
//! explicit arm, so adding a variant is a compile error here until handled.

use crate::db::types::Value;
use sqlx::Sqlite;
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;

/// Bind one parameter to a SQLite query.
pub(crate) fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &'q Value,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Integer(v) => query.bind(*v),
        Value::Real(v) => query.bind(*v),
        Value::Text(v) => query.bind(v.as_str()),
        Value::Blob(v) => query.bind(v.as_slice()),
    }
}

/// Prepare `sql` and bind all `params` in order.
///
/// The statement is not cached on the connection: it is finalized once the
/// query has run, whatever the outcome.
pub(crate) fn prepare<'q>(
    sql: &'q str,
    params: &'q [Value],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    params
        .iter()
        .fold(sqlx::query(sql).persistent(false), bind_value)
}
