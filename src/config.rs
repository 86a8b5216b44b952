//! Configuration handling for the records store.
//!
//! This module provides configuration via CLI arguments and environment
//! variables, and the [`DatabaseTarget`] type naming the SQLite database a
//! connection opens.

use crate::error::{DbError, DbResult};
use clap::Parser;
use sqlx::sqlite::SqliteConnectOptions;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATABASE: &str = "sqlite:records.db";
pub const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Where a connection points: an on-disk file or a private in-memory database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseTarget {
    location: Location,
    /// Default: false
    pub read_only: bool,
    pub busy_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    Memory,
    File(PathBuf),
}

impl DatabaseTarget {
    /// A fresh in-memory database, private to the connection that opens it.
    pub fn memory() -> Self {
        Self {
            location: Location::Memory,
            read_only: false,
            busy_timeout: Duration::from_secs(DEFAULT_BUSY_TIMEOUT_SECS),
        }
    }

    /// A database file, created on first connect unless read-only.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            location: Location::File(path.as_ref().to_path_buf()),
            read_only: false,
            busy_timeout: Duration::from_secs(DEFAULT_BUSY_TIMEOUT_SECS),
        }
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn is_memory(&self) -> bool {
        self.location == Location::Memory
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            Location::File(path) => Some(path),
            Location::Memory => None,
        }
    }

    /// Parse a target string.
    ///
    /// # Format
    ///
    /// ```text
    /// sqlite::memory:          # in-memory
    /// :memory:                 # in-memory
    /// sqlite:data/records.db   # file
    /// sqlite://records.db      # file
    /// records.db               # file
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Database target must not be empty".to_string());
        }

        let rest = match s.strip_prefix("sqlite:") {
            Some(rest) => rest.strip_prefix("//").unwrap_or(rest),
            None => {
                if let Some(idx) = s.find("://") {
                    return Err(format!(
                        "Unsupported database scheme '{}': only sqlite is supported",
                        &s[..idx]
                    ));
                }
                s
            }
        };

        if rest == ":memory:" {
            return Ok(Self::memory());
        }
        if rest.is_empty() {
            return Err(format!("Missing database path in '{}'", s));
        }
        Ok(Self::file(rest))
    }

    /// Build driver options. Foreign keys are always enforced.
    pub fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = match &self.location {
            Location::Memory => SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| {
                DbError::data_access(format!("Invalid SQLite target: {}", e), None)
            })?,
            Location::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(!self.read_only),
        };

        Ok(options
            .read_only(self.read_only)
            .foreign_keys(true)
            .busy_timeout(self.busy_timeout))
    }
}

impl fmt::Display for DatabaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Location::Memory => write!(f, "sqlite::memory:"),
            Location::File(path) => write!(f, "sqlite:{}", path.display()),
        }
    }
}

impl FromStr for DatabaseTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "records-store",
    about = "Create and inspect the SQLite database behind the school records system",
    version,
    author
)]
pub struct Config {
    /// Database to open. Format: "sqlite:path", "sqlite::memory:" or a bare path.
    #[arg(
        short = 'd',
        long = "database",
        value_name = "TARGET",
        default_value = DEFAULT_DATABASE,
        env = "RECORDS_DATABASE",
        value_parser = DatabaseTarget::parse
    )]
    pub database: DatabaseTarget,

    /// Seconds to wait on a locked database before failing
    #[arg(
        long,
        default_value_t = DEFAULT_BUSY_TIMEOUT_SECS,
        env = "RECORDS_BUSY_TIMEOUT"
    )]
    pub busy_timeout: u64,

    /// Open the database read-only (schema must already exist)
    #[arg(long, env = "RECORDS_READ_ONLY")]
    pub read_only: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = DEFAULT_LOG_LEVEL, env = "RECORDS_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "RECORDS_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// The configured database with the read-only and timeout flags applied.
    pub fn target(&self) -> DatabaseTarget {
        self.database
            .clone()
            .with_read_only(self.read_only)
            .with_busy_timeout(Duration::from_secs(self.busy_timeout))
    }
}
