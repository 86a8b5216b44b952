//! Records Store Library
//!
//! Data-access core for an academic records system: a SQLite connector, a
//! parameterized adapter with nested transactions, entity parsers and typed
//! DAOs wired together by [`DataContext`].

pub mod config;
pub mod context;
pub mod dao;
pub mod db;
pub mod error;
pub mod models;
pub mod parser;

pub use config::{Config, DatabaseTarget};
pub use context::{DataContext, SharedAdapter};
pub use db::{Adapter, Connector, Row, Table, Value};
pub use error::{DbError, DbResult, ErrorCode};
pub use parser::EntityParser;
