//! Ownership of the single native SQLite connection.
//!
//! The [`Connector`] knows how to open and close one connection to one
//! [`DatabaseTarget`] and how to run an unparameterized statement on it.
//! It has no notion of parameters, result rows or transactions.
//!
//! sqlx is async; the connector owns a private current-thread runtime and
//! blocks on it, so every call here blocks the calling thread until the
//! driver returns. Do not call into a connector from inside another tokio
//! runtime.

use crate::config::DatabaseTarget;
use crate::error::{DbError, DbResult};
use sqlx::sqlite::SqliteConnection;
use sqlx::{ConnectOptions, Connection};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info, warn};

pub struct Connector {
    target: DatabaseTarget,
    runtime: Runtime,
    connection: Option<SqliteConnection>,
}

impl Connector {
    /// Create a disconnected connector for `target`.
    pub fn new(target: DatabaseTarget) -> DbResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| DbError::data_access(format!("Failed to start driver runtime: {}", e), None))?;

        Ok(Self {
            target,
            runtime,
            connection: None,
        })
    }

    pub fn target(&self) -> &DatabaseTarget {
        &self.target
    }

    /// Open the connection. Succeeds immediately if already connected.
    ///
    /// On failure nothing is retained: a half-opened handle is dropped by the
    /// driver before the error is returned.
    pub fn connect(&mut self) -> DbResult<()> {
        if self.connection.is_some() {
            debug!(target_db = %self.target, "Already connected");
            return Ok(());
        }

        let options = self.target.connect_options()?;
        info!(target_db = %self.target, "Connecting to database");

        let connection = self
            .runtime
            .block_on(options.connect())
            .map_err(|e| DbError::data_access(format!("Failed to connect: {}", e), None))?;

        self.connection = Some(connection);
        Ok(())
    }

    /// Close the connection if one is held. A no-op otherwise.
    pub fn disconnect(&mut self) -> DbResult<()> {
        let Some(connection) = self.connection.take() else {
            return Ok(());
        };

        info!(target_db = %self.target, "Disconnecting from database");
        self.runtime.block_on(connection.close()).map_err(DbError::from)
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Run a statement without parameters or results. Meant for DDL.
    pub fn execute_raw(&mut self, sql: &str) -> DbResult<()> {
        let (runtime, connection) = self.parts()?;
        debug!(sql = %sql, "Executing raw statement");
        runtime
            .block_on(sqlx::raw_sql(sql).execute(&mut *connection))
            .map(|_| ())
            .map_err(DbError::from)
    }

    /// Split borrow of the runtime and the live connection.
    pub(crate) fn parts(&mut self) -> DbResult<(&Runtime, &mut SqliteConnection)> {
        match self.connection.as_mut() {
            Some(connection) => Ok((&self.runtime, connection)),
            None => Err(DbError::data_access(
                format!("Not connected to {}", self.target),
                None,
            )),
        }
    }
}

impl Drop for Connector {
    fn drop(&mut self) {
        if let Some(connection) = self.connection.take() {
            if let Err(e) = self.runtime.block_on(connection.close()) {
                warn!(target_db = %self.target, error = %e, "Failed to close connection on drop");
            }
        }
    }
}

impl std::fmt::Debug for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connector")
            .field("target", &self.target)
            .field("connected", &self.connection.is_some())
            .finish()
    }
}
