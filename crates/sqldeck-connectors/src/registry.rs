//! Connector registry mapping engine ids to connectors

use sqldeck_core::Connector;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of available database connectors
///
/// A pure lookup table: unknown engine ids resolve to `None`, never an
/// error. The dispatcher decides what a miss means.
pub struct ConnectorRegistry {
    connectors: HashMap<String, Arc<dyn Connector>>,
}

impl ConnectorRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            connectors: HashMap::new(),
        }
    }

    /// Create a registry with all built-in connectors registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        #[cfg(feature = "mssql")]
        registry.register(Arc::new(crate::mssql::MssqlConnector::new()));
        #[cfg(feature = "mysql")]
        registry.register(Arc::new(crate::mysql::MySqlConnector::new()));

        registry
    }

    /// Register a connector under its engine id
    pub fn register(&mut self, connector: Arc<dyn Connector>) {
        let id = connector.id().to_string();
        tracing::info!(connector = %id, "registering database connector");
        self.connectors.insert(id, connector);
    }

    /// Get a connector by engine id
    pub fn get(&self, db_type: &str) -> Option<Arc<dyn Connector>> {
        let connector = self.connectors.get(db_type).cloned();
        if connector.is_none() {
            tracing::warn!(db_type = %db_type, "connector not found in registry");
        }
        connector
    }

    /// Check if an engine id is registered
    pub fn has(&self, db_type: &str) -> bool {
        self.connectors.contains_key(db_type)
    }

    /// List all registered engine ids
    pub fn list(&self) -> Vec<&str> {
        self.connectors.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ConnectorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
