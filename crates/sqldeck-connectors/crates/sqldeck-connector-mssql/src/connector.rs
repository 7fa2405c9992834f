//! MS SQL Server connector

use crate::connection::{DEFAULT_PORT, MssqlConnection};
use async_trait::async_trait;
use sqldeck_core::{Connection, Connector, Preset, Result};

/// MS SQL Server connector
pub struct MssqlConnector;

impl MssqlConnector {
    /// Create a new MS SQL Server connector instance
    pub fn new() -> Self {
        tracing::debug!("MS SQL Server connector initialized");
        Self
    }
}

impl Default for MssqlConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for MssqlConnector {
    fn id(&self) -> &'static str {
        "mssql"
    }

    fn display_name(&self) -> &'static str {
        "MSSQL"
    }

    fn default_port(&self) -> Option<u16> {
        Some(DEFAULT_PORT)
    }

    #[tracing::instrument(skip(self, preset), fields(preset = %preset.name))]
    async fn connect(&self, preset: &Preset) -> Result<Box<dyn Connection>> {
        let connection = MssqlConnection::connect(preset).await?;
        Ok(Box::new(connection))
    }
}
