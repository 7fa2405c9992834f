//! sqldeck connectors - database engine implementations
//!
//! This crate provides the connector registry plus re-exports of the
//! per-engine crates implementing the traits defined in `sqldeck-core`.

#[cfg(feature = "mssql")]
pub use sqldeck_connector_mssql as mssql;
#[cfg(feature = "mysql")]
pub use sqldeck_connector_mysql as mysql;

mod registry;

pub use registry::ConnectorRegistry;

/// Re-export commonly used types from sqldeck-core
pub use sqldeck_core::{
    ColumnMeta, Connection, Connector, Preset, QueryResult, Result, Row, SqldeckError, Value,
};
