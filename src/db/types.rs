//! Dynamic value and row types exchanged with the database.
//!
//! # Architecture
//!
//! Row materialization uses a two-phase approach:
//! 1. `TypeCategory` classifies the storage class the engine reports for a value
//! 2. A per-category decoder extracts it into the matching [`Value`] variant
//!
//! Integers are normalized to `i64` here, once, so parsers never have to care
//! which width the driver handed back.

use crate::error::{DbError, DbResult};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row as _, TypeInfo, ValueRef};
use std::collections::HashMap;

// =============================================================================
// Values
// =============================================================================

/// A single dynamically typed column value or statement parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// NULL value
    Null,
    /// Integer value (always widened to i64)
    Integer(i64),
    /// Floating point value
    Real(f64),
    /// Text value
    Text(String),
    /// Binary data (base64 encoded in JSON)
    #[serde(with = "base64_bytes")]
    Blob(Vec<u8>),
}

impl Value {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the type name of this value for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
        }
    }

    /// Text that is empty binds as NULL; used for optional entity fields.
    pub fn optional_text(text: &str) -> Self {
        if text.is_empty() {
            Self::Null
        } else {
            Self::Text(text.to_owned())
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Blob(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Self::Null)
    }
}

/// Custom serialization for binary data as base64.
mod base64_bytes {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(bytes: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        STANDARD.encode(bytes).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

/// Positional statement parameters; order matters.
pub type Params = Vec<Value>;

/// Result of a query: one [`Row`] per matched record. Empty means no match.
pub type Table = Vec<Row>;

// =============================================================================
// Rows
// =============================================================================

/// One record: column name to value. Column order is not preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(HashMap<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(HashMap::with_capacity(capacity))
    }

    /// Add a column value, builder style.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    /// Insert a column value, replacing any previous value for the column.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// =============================================================================
// Type Classification
// =============================================================================

/// Logical category for a storage class reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    Null,
    Integer,
    Float,
    Text,
    Binary,
}

/// Classify a type name into a logical category.
///
/// Anything unrecognised (dates, NUMERIC, custom declarations) is read as text.
pub fn categorize_type(type_name: &str) -> TypeCategory {
    let lower = type_name.to_lowercase();

    if lower == "null" {
        return TypeCategory::Null;
    }

    if lower.contains("int") || lower == "boolean" {
        return TypeCategory::Integer;
    }

    if lower.contains("real") || lower.contains("float") || lower.contains("double") {
        return TypeCategory::Float;
    }

    if lower.contains("blob") {
        return TypeCategory::Binary;
    }

    TypeCategory::Text
}

// =============================================================================
// Row Materialization
// =============================================================================

/// Trait for converting driver rows into [`Row`]s.
pub trait IntoValueRow {
    fn to_value_row(&self) -> DbResult<Row>;
}

impl IntoValueRow for SqliteRow {
    fn to_value_row(&self) -> DbResult<Row> {
        let mut row = Row::with_capacity(self.len());
        for column in self.columns() {
            let idx = column.ordinal();
            // Storage class of this value, not the declared column type.
            let category = {
                let raw = self.try_get_raw(idx)?;
                if raw.is_null() {
                    TypeCategory::Null
                } else {
                    categorize_type(raw.type_info().name())
                }
            };
            let value = decode_column(self, idx, category)?;
            row.insert(column.name(), value);
        }
        Ok(row)
    }
}

fn decode_column(row: &SqliteRow, idx: usize, category: TypeCategory) -> DbResult<Value> {
    match category {
        TypeCategory::Null => Ok(Value::Null),
        TypeCategory::Integer => decode_integer(row, idx),
        TypeCategory::Float => Ok(Value::Real(row.try_get::<f64, _>(idx)?)),
        TypeCategory::Binary => Ok(Value::Blob(row.try_get::<Vec<u8>, _>(idx)?)),
        TypeCategory::Text => Ok(Value::Text(row.try_get::<String, _>(idx)?)),
    }
}

/// Wide type first, then the narrow one; never truncate silently.
fn decode_integer(row: &SqliteRow, idx: usize) -> DbResult<Value> {
    match row.try_get::<i64, _>(idx) {
        Ok(v) => Ok(Value::Integer(v)),
        Err(wide_err) => match row.try_get::<i32, _>(idx) {
            Ok(v) => Ok(Value::Integer(i64::from(v))),
            Err(_) => Err(DbError::from(wide_err)),
        },
    }
}
