//! Query dispatcher orchestrating one connect/query/disconnect cycle

use sqldeck_connectors::ConnectorRegistry;
use sqldeck_core::{Preset, QueryResult, Result, SqldeckError};
use sqldeck_presets::{RC_FILE_NAME, get_preset_by_name, load_presets};

/// Orchestrates query execution against the configured presets
///
/// The preset list is injected at construction and never mutated. `None`
/// records that the load at bootstrap failed, so every later dispatch
/// fails with the same "Presets not loaded" outcome the user saw at
/// startup instead of a confusing downstream error.
pub struct Dispatcher {
    presets: Option<Vec<Preset>>,
    registry: ConnectorRegistry,
}

impl Dispatcher {
    /// Create a dispatcher from a load outcome and a registry
    pub fn new(presets: Option<Vec<Preset>>, registry: ConnectorRegistry) -> Self {
        Self { presets, registry }
    }

    /// Create a dispatcher over an already-loaded preset list
    pub fn with_presets(presets: Vec<Preset>, registry: ConnectorRegistry) -> Self {
        Self::new(Some(presets), registry)
    }

    /// Create a dispatcher wired to the user's home config
    ///
    /// A failed load is not fatal here; it surfaces on each dispatch
    /// until the config is fixed and the process restarted.
    pub fn from_user_config(registry: ConnectorRegistry) -> Self {
        let presets = match load_presets() {
            Ok(presets) => Some(presets),
            Err(e) => {
                tracing::warn!(error = %e, "presets unavailable, dispatches will fail");
                None
            }
        };
        Self::new(presets, registry)
    }

    /// The loaded presets, if loading succeeded
    pub fn presets(&self) -> Option<&[Preset]> {
        self.presets.as_deref()
    }

    /// Resolve the preset for a dispatch: by name when given, otherwise
    /// the first preset in load order.
    fn resolve_preset(&self, preset_name: Option<&str>) -> Result<&Preset> {
        let presets = self
            .presets
            .as_ref()
            .ok_or(SqldeckError::PresetsNotLoaded)?;

        let preset = match preset_name {
            Some(name) => get_preset_by_name(presets, name),
            None => presets.first(),
        };

        preset.ok_or_else(|| SqldeckError::NoPresetsAvailable {
            config: format!("~/{}", RC_FILE_NAME),
        })
    }

    /// Run one query against the named preset (or the default)
    ///
    /// Once a connection exists it is always torn down before this
    /// returns. A disconnect failure is surfaced only when the query
    /// itself succeeded; otherwise the query error takes precedence.
    #[tracing::instrument(
        skip(self, query),
        fields(
            preset = preset_name.unwrap_or("<default>"),
            query_preview = %query.chars().take(80).collect::<String>()
        )
    )]
    pub async fn dispatch(&self, query: &str, preset_name: Option<&str>) -> Result<QueryResult> {
        let preset = self.resolve_preset(preset_name)?;

        let connector = self
            .registry
            .get(&preset.db_type)
            .ok_or_else(|| SqldeckError::UnsupportedDbType(preset.db_type.clone()))?;

        let connection = connector.connect(preset).await?;

        // Capture the query outcome instead of propagating it so the
        // connection is never leaked past this point.
        let query_result = connection.query(query).await;
        let disconnect_result = connection.disconnect().await;

        match query_result {
            Ok(result) => {
                disconnect_result?;
                tracing::debug!(rows = result.row_count(), "dispatch completed");
                Ok(result)
            }
            Err(query_err) => {
                if let Err(disconnect_err) = disconnect_result {
                    tracing::warn!(error = %disconnect_err, "disconnect failed after query error");
                }
                tracing::error!(error = %query_err, "dispatch failed");
                Err(query_err)
            }
        }
    }
}
