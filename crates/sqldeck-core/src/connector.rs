//! Connector and connection traits

use crate::{Preset, QueryResult, Result};
use async_trait::async_trait;

/// Entry point for a database engine
///
/// One implementation per engine. Connectors are stateless; all per-query
/// state lives on the `Connection` handle returned by `connect`.
/// Registering an implementation in the connector registry is the only
/// step needed to add an engine.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Registry key for this engine (e.g. "mssql", "mysql")
    fn id(&self) -> &'static str;

    /// Label used in user-facing error prefixes (e.g. "MSSQL", "MySQL")
    fn display_name(&self) -> &'static str;

    /// Default connection port for the engine
    fn default_port(&self) -> Option<u16> {
        None
    }

    /// Open a connection using the preset's credentials
    ///
    /// Never lets a driver error escape: any failure comes back as a
    /// `ConnectionFailed` outcome carrying the engine label.
    async fn connect(&self, preset: &Preset) -> Result<Box<dyn Connection>>;
}

/// A live database connection
///
/// The dispatcher owns a handle for exactly one query cycle: one `query`
/// call, then `disconnect`, on success and failure paths alike.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Get the engine id this connection belongs to
    fn driver_name(&self) -> &str;

    /// Execute one query string and normalize the result
    async fn query(&self, sql: &str) -> Result<QueryResult>;

    /// Close the connection
    ///
    /// Safe to call on an already-degraded or already-closed handle; a
    /// repeat call is a no-op rather than an error.
    async fn disconnect(&self) -> Result<()>;

    /// Check if the connection has been closed
    fn is_closed(&self) -> bool;
}
