//! MySQL connector

use crate::connection::{DEFAULT_PORT, MySqlConnection};
use async_trait::async_trait;
use sqldeck_core::{Connection, Connector, Preset, Result};

/// MySQL database connector
pub struct MySqlConnector;

impl MySqlConnector {
    /// Create a new MySQL connector instance
    pub fn new() -> Self {
        tracing::debug!("MySQL connector initialized");
        Self
    }
}

impl Default for MySqlConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for MySqlConnector {
    fn id(&self) -> &'static str {
        "mysql"
    }

    fn display_name(&self) -> &'static str {
        "MySQL"
    }

    fn default_port(&self) -> Option<u16> {
        Some(DEFAULT_PORT)
    }

    #[tracing::instrument(skip(self, preset), fields(preset = %preset.name))]
    async fn connect(&self, preset: &Preset) -> Result<Box<dyn Connection>> {
        let connection = MySqlConnection::connect(preset).await?;
        Ok(Box::new(connection))
    }
}
