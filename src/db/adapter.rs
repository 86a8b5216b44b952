//! Parameterized SQL execution and transaction management.
//!
//! The [`Adapter`] is the only component that speaks "SQL with parameters and
//! structured results". It wraps a [`Connector`], binds [`Value`] parameters
//! positionally, materializes result rows into [`Row`]s and translates native
//! failures into [`DbError`]s.
//!
//! # Transactions
//!
//! Nesting is tracked with a depth counter. Depth 0 is "no transaction"; the
//! first `begin` issues a real `BEGIN`, deeper ones create a savepoint named
//! after the depth they open (`sp_1`, `sp_2`, ...), so names never collide.
//! Commit and rollback always act on the innermost level only.
//!
//! An adapter is not internally synchronized. Share it behind a lock (see
//! [`SharedAdapter`](crate::context::SharedAdapter)) and keep each
//! begin/commit pair on one thread.

use crate::config::DatabaseTarget;
use crate::db::connector::Connector;
use crate::db::params::prepare;
use crate::db::schema;
use crate::db::types::{IntoValueRow, Row, Table, Value};
use crate::error::{DbError, DbResult};
use tracing::{debug, error, info, warn};

#[derive(Debug, Default)]
pub struct Adapter {
    connector: Option<Connector>,
    depth: usize,
}

impl Adapter {
    /// Create a disconnected adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect to `target`. Succeeds without reconnecting if already connected.
    ///
    /// Schema creation is a separate step, see [`Adapter::ensure_schema`].
    pub fn connect(&mut self, target: DatabaseTarget) -> DbResult<()> {
        if let Some(connector) = &self.connector {
            if connector.is_connected() {
                if *connector.target() != target {
                    warn!(
                        connected_to = %connector.target(),
                        requested = %target,
                        "Adapter already connected; ignoring new target"
                    );
                }
                return Ok(());
            }
        }

        let mut connector = Connector::new(target)?;
        connector.connect()?;
        self.connector = Some(connector);
        self.depth = 0;
        Ok(())
    }

    /// Disconnect. Fails, leaving the connection open, while a transaction is active.
    pub fn disconnect(&mut self) -> DbResult<()> {
        if self.depth > 0 {
            error!(depth = self.depth, "Disconnect requested with an open transaction");
            return Err(DbError::operation_failed(format!(
                "cannot disconnect with an open transaction (depth {})",
                self.depth
            )));
        }

        match self.connector.take() {
            Some(mut connector) => connector.disconnect(),
            None => Ok(()),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connector
            .as_ref()
            .is_some_and(|connector| connector.is_connected())
    }

    pub fn target(&self) -> Option<&DatabaseTarget> {
        self.connector.as_ref().map(|connector| connector.target())
    }

    /// Create every table and index that does not exist yet.
    pub fn ensure_schema(&mut self) -> DbResult<()> {
        self.transaction(|adapter| {
            let connector = adapter.connector_mut()?;
            for statement in schema::STATEMENTS {
                connector.execute_raw(statement)?;
            }
            Ok(())
        })?;
        info!(tables = schema::TABLES.len(), "Schema ensured");
        Ok(())
    }

    /// Run a statement and return every result row.
    ///
    /// An empty table means nothing matched; it is not an error.
    pub fn execute_query(&mut self, sql: &str, params: &[Value]) -> DbResult<Table> {
        debug!(sql = %sql, params = params.len(), "Executing query");

        let (runtime, connection) = self.connector_mut()?.parts()?;
        let rows = runtime
            .block_on(prepare(sql, params).fetch_all(&mut *connection))
            .map_err(DbError::from)?;

        rows.iter().map(IntoValueRow::to_value_row).collect()
    }

    /// Run a write statement and return the number of rows it affected.
    ///
    /// Zero is a legitimate result; callers decide what it means.
    pub fn execute_update(&mut self, sql: &str, params: &[Value]) -> DbResult<u64> {
        debug!(sql = %sql, params = params.len(), "Executing update");

        let (runtime, connection) = self.connector_mut()?.parts()?;
        let result = runtime
            .block_on(prepare(sql, params).execute(&mut *connection))
            .map_err(DbError::from)?;

        Ok(result.rows_affected())
    }

    /// Open a transaction, or a savepoint when one is already open.
    pub fn begin_transaction(&mut self) -> DbResult<()> {
        let sql = if self.depth == 0 {
            "BEGIN TRANSACTION".to_string()
        } else {
            format!("SAVEPOINT {}", savepoint_name(self.depth))
        };

        self.connector_mut()?.execute_raw(&sql)?;
        self.depth += 1;
        debug!(depth = self.depth, "Transaction level opened");
        Ok(())
    }

    /// Commit the innermost level.
    ///
    /// On failure the depth is left unchanged so the caller can still roll back.
    pub fn commit_transaction(&mut self) -> DbResult<()> {
        let sql = match self.depth {
            0 => {
                return Err(DbError::operation_failed(
                    "commit requested with no active transaction",
                ));
            }
            1 => "COMMIT".to_string(),
            depth => format!("RELEASE SAVEPOINT {}", savepoint_name(depth - 1)),
        };

        self.connector_mut()?.execute_raw(&sql)?;
        self.depth -= 1;
        debug!(depth = self.depth, "Transaction level committed");
        Ok(())
    }

    /// Roll back the innermost level only; outer levels are untouched.
    ///
    /// The depth is decremented even if the engine reports a failure.
    pub fn rollback_transaction(&mut self) -> DbResult<()> {
        let statements = match self.depth {
            0 => {
                return Err(DbError::operation_failed(
                    "rollback requested with no active transaction",
                ));
            }
            1 => vec!["ROLLBACK".to_string()],
            depth => {
                let name = savepoint_name(depth - 1);
                vec![
                    format!("ROLLBACK TO SAVEPOINT {}", name),
                    format!("RELEASE SAVEPOINT {}", name),
                ]
            }
        };

        warn!(depth = self.depth, "Rolling back transaction level");
        self.depth -= 1;

        let connector = self.connector_mut()?;
        for sql in &statements {
            connector.execute_raw(sql)?;
        }
        Ok(())
    }

    pub fn is_in_transaction(&self) -> bool {
        self.depth > 0
    }

    /// Current nesting level; 0 when no transaction is open.
    pub fn transaction_depth(&self) -> usize {
        self.depth
    }

    /// Run `f` inside one transaction level.
    ///
    /// Commits when `f` succeeds. If `f` or the commit fails, the level is
    /// rolled back before the original error is returned.
    pub fn transaction<T, F>(&mut self, f: F) -> DbResult<T>
    where
        F: FnOnce(&mut Self) -> DbResult<T>,
    {
        self.begin_transaction()?;

        let result = f(&mut *self).and_then(|value| self.commit_transaction().map(|()| value));

        if let Err(e) = &result {
            if let Err(rollback_err) = self.rollback_transaction() {
                error!(
                    error = %e,
                    rollback_error = %rollback_err,
                    "Rollback failed after transaction error"
                );
            }
        }

        result
    }

    fn connector_mut(&mut self) -> DbResult<&mut Connector> {
        self.connector
            .as_mut()
            .filter(|connector| connector.is_connected())
            .ok_or_else(|| DbError::data_access("Adapter is not connected", None))
    }
}

impl Drop for Adapter {
    fn drop(&mut self) {
        if self.depth > 0 && self.is_connected() {
            error!(
                depth = self.depth,
                "Adapter dropped with an open transaction; uncommitted work is discarded"
            );
        }
    }
}

/// Savepoint opened when the depth goes from `depth` to `depth + 1`.
fn savepoint_name(depth: usize) -> String {
    format!("sp_{}", depth)
}

/// Convenience for single-value lookups such as `SELECT COUNT(*) AS n`.
pub fn scalar_integer(table: &Table, column: &str) -> DbResult<i64> {
    match table.first().and_then(|row: &Row| row.get(column)) {
        Some(Value::Integer(v)) => Ok(*v),
        Some(other) => Err(DbError::parsing(format!(
            "column '{}' is {}, expected integer",
            column,
            other.type_name()
        ))),
        None => Err(DbError::not_found(format!("column '{}' not in result", column))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn connected() -> Adapter {
        let mut adapter = Adapter::new();
        adapter.connect(DatabaseTarget::memory()).unwrap();
        adapter
    }

    #[test]
    fn test_savepoint_names_follow_depth() {
        assert_eq!(savepoint_name(1), "sp_1");
        assert_eq!(savepoint_name(3), "sp_3");
    }

    #[test]
    fn test_connect_is_idempotent() {
        let mut adapter = connected();
        adapter.connect(DatabaseTarget::memory()).unwrap();
        assert!(adapter.is_connected());
        adapter.disconnect().unwrap();
        assert!(!adapter.is_connected());
        adapter.disconnect().unwrap();
    }

    #[test]
    fn test_queries_require_connection() {
        let mut adapter = Adapter::new();
        let err = adapter.execute_query("SELECT 1", &[]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::DataAccessError);
    }

    #[test]
    fn test_depth_tracks_nesting() {
        let mut adapter = connected();
        assert!(!adapter.is_in_transaction());
        adapter.begin_transaction().unwrap();
        adapter.begin_transaction().unwrap();
        assert_eq!(adapter.transaction_depth(), 2);
        adapter.commit_transaction().unwrap();
        assert_eq!(adapter.transaction_depth(), 1);
        adapter.rollback_transaction().unwrap();
        assert!(!adapter.is_in_transaction());
    }

    #[test]
    fn test_commit_and_rollback_at_depth_zero_fail() {
        let mut adapter = connected();
        assert_eq!(
            adapter.commit_transaction().unwrap_err().code(),
            ErrorCode::OperationFailed
        );
        assert_eq!(
            adapter.rollback_transaction().unwrap_err().code(),
            ErrorCode::OperationFailed
        );
        assert_eq!(adapter.transaction_depth(), 0);
    }

    #[test]
    fn test_disconnect_with_open_transaction_is_refused() {
        let mut adapter = connected();
        adapter.begin_transaction().unwrap();
        let err = adapter.disconnect().unwrap_err();
        assert_eq!(err.code(), ErrorCode::OperationFailed);
        assert!(adapter.is_connected());
        adapter.rollback_transaction().unwrap();
        adapter.disconnect().unwrap();
    }

    #[test]
    fn test_transaction_helper_rolls_back_on_error() {
        let mut adapter = connected();
        adapter
            .execute_update("CREATE TABLE t (x INTEGER PRIMARY KEY)", &[])
            .unwrap();

        let result: DbResult<()> = adapter.transaction(|a| {
            a.execute_update("INSERT INTO t (x) VALUES (?)", &[Value::Integer(1)])?;
            Err(DbError::validation("stop"))
        });
        assert_eq!(result.unwrap_err().code(), ErrorCode::ValidationError);
        assert_eq!(adapter.transaction_depth(), 0);

        let rows = adapter.execute_query("SELECT COUNT(*) AS n FROM t", &[]).unwrap();
        assert_eq!(scalar_integer(&rows, "n").unwrap(), 0);
    }

    #[test]
    fn test_scalar_integer_errors() {
        let table = vec![Row::new().with("n", "three")];
        assert_eq!(
            scalar_integer(&table, "n").unwrap_err().code(),
            ErrorCode::ParsingError
        );
        assert_eq!(
            scalar_integer(&Vec::new(), "n").unwrap_err().code(),
            ErrorCode::NotFound
        );
    }
}
