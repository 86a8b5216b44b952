//! Data access engine.
//!
//! This module provides the layers below the typed DAOs:
//! - Connection ownership (`connector`)
//! - Parameterized execution and transactions (`adapter`)
//! - Dynamic values and row materialization (`types`)
//! - Parameter binding (`params`)
//! - Table definitions (`schema`)

pub mod adapter;
pub mod connector;
pub(crate) mod params;
pub mod schema;
pub mod types;

pub use adapter::{Adapter, scalar_integer};
pub use connector::Connector;
pub use types::{Params, Row, Table, Value};
