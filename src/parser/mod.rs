//! Row and entity conversion.
//!
//! An [`EntityParser`] is the one place where the mapping between a [`Row`] /
//! parameter list and a typed entity lives. Parsers are stateless unit structs:
//! no I/O, no side effects, same input same output.
//!
//! # Parameter order
//!
//! `to_insert_params` and `to_update_params` produce positional lists whose
//! order must match the SQL text in the corresponding DAO. Each parser
//! documents its order; changing it means changing the DAO statements too.
//! Update lists always end with the identity column(s), for the WHERE clause.

pub mod academic;
pub mod finance;
pub mod login;
pub mod user;

pub use academic::{CourseParser, CourseResultParser, EnrollmentParser, FacultyParser};
pub use finance::{FeeRecordParser, SalaryRecordParser};
pub use login::LoginParser;
pub use user::{StudentParser, TeacherParser};

use crate::db::types::{Params, Row, Table, Value};
use crate::error::{DbError, DbResult};
use std::str::FromStr;

/// Bidirectional mapping between rows and one entity type.
pub trait EntityParser {
    type Entity;

    /// Entity name used in error messages.
    const ENTITY: &'static str;

    /// Build an entity from a row. Missing or mistyped required columns are
    /// parsing errors naming the column; null optional columns take defaults.
    fn parse(&self, row: &Row) -> DbResult<Self::Entity>;

    /// Inverse of [`EntityParser::parse`].
    fn serialize(&self, entity: &Self::Entity) -> DbResult<Row>;

    fn to_insert_params(&self, entity: &Self::Entity) -> DbResult<Params>;

    fn to_update_params(&self, entity: &Self::Entity) -> DbResult<Params>;

    /// Parse every row of a result table, failing on the first bad row.
    fn parse_all(&self, table: &Table) -> DbResult<Vec<Self::Entity>> {
        table.iter().map(|row| self.parse(row)).collect()
    }
}

// =============================================================================
// Column Extraction
// =============================================================================

fn missing(column: &str) -> DbError {
    DbError::parsing(format!("missing required column '{}'", column))
}

fn mistyped(column: &str, expected: &str, found: &Value) -> DbError {
    DbError::parsing(format!(
        "column '{}' should be {}, found {}",
        column,
        expected,
        found.type_name()
    ))
}

/// Required text column.
pub(crate) fn text(row: &Row, column: &str) -> DbResult<String> {
    match row.get(column) {
        Some(Value::Text(v)) => Ok(v.clone()),
        Some(Value::Null) | None => Err(missing(column)),
        Some(other) => Err(mistyped(column, "text", other)),
    }
}

/// Optional text column; null or absent becomes an empty string.
pub(crate) fn optional_text(row: &Row, column: &str) -> DbResult<String> {
    match row.get(column) {
        Some(Value::Text(v)) => Ok(v.clone()),
        Some(Value::Null) | None => Ok(String::new()),
        Some(other) => Err(mistyped(column, "text", other)),
    }
}

/// Optional text column, kept as `None` when null or absent.
pub(crate) fn nullable_text(row: &Row, column: &str) -> DbResult<Option<String>> {
    match row.get(column) {
        Some(Value::Text(v)) => Ok(Some(v.clone())),
        Some(Value::Null) | None => Ok(None),
        Some(other) => Err(mistyped(column, "text", other)),
    }
}

/// Required integer column, converted to the entity's field type.
///
/// Values that do not fit the target type are rejected rather than truncated.
pub(crate) fn integer<T>(row: &Row, column: &str) -> DbResult<T>
where
    T: TryFrom<i64>,
{
    match row.get(column) {
        Some(Value::Integer(v)) => T::try_from(*v).map_err(|_| {
            DbError::parsing(format!("column '{}' value {} is out of range", column, v))
        }),
        Some(Value::Null) | None => Err(missing(column)),
        Some(other) => Err(mistyped(column, "integer", other)),
    }
}

/// Required numeric column as f64; integer storage is widened.
pub(crate) fn real(row: &Row, column: &str) -> DbResult<f64> {
    match row.get(column) {
        Some(Value::Real(v)) => Ok(*v),
        // SQLite stores whole REAL values compactly; widening is lossless here.
        Some(Value::Integer(v)) => Ok(*v as f64),
        Some(Value::Null) | None => Err(missing(column)),
        Some(other) => Err(mistyped(column, "real", other)),
    }
}

/// Required text column holding an enum's textual form.
pub(crate) fn enumerated<T>(row: &Row, column: &str) -> DbResult<T>
where
    T: FromStr<Err = String>,
{
    let raw = text(row, column)?;
    raw.parse()
        .map_err(|e| DbError::parsing(format!("column '{}': {}", column, e)))
}
