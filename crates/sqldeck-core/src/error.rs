//! Error types for sqldeck

use thiserror::Error;

/// Core error type for sqldeck operations
///
/// The connect/query/disconnect variants render with the engine label in
/// front ("MSSQL query failed: ..."); callers extract the human-readable
/// detail after that prefix.
#[derive(Error, Debug)]
pub enum SqldeckError {
    #[error("{engine} connection failed: {message}")]
    ConnectionFailed {
        engine: &'static str,
        message: String,
    },

    #[error("{engine} query failed: {message}")]
    QueryFailed {
        engine: &'static str,
        message: String,
    },

    #[error("{engine} disconnection failed: {message}")]
    DisconnectionFailed {
        engine: &'static str,
        message: String,
    },

    #[error("Presets not loaded")]
    PresetsNotLoaded,

    #[error("No presets available in {config}")]
    NoPresetsAvailable { config: String },

    #[error("Unsupported database type: {0}")]
    UnsupportedDbType(String),

    #[error("Failed to load presets: {0}")]
    PresetLoad(String),
}

impl SqldeckError {
    /// Wrap a native driver error raised while establishing a connection.
    pub fn connection_failed(engine: &'static str, message: impl std::fmt::Display) -> Self {
        Self::ConnectionFailed {
            engine,
            message: message.to_string(),
        }
    }

    /// Wrap a native driver error raised while executing a query.
    pub fn query_failed(engine: &'static str, message: impl std::fmt::Display) -> Self {
        Self::QueryFailed {
            engine,
            message: message.to_string(),
        }
    }

    /// Wrap a native driver error raised while closing a connection.
    pub fn disconnection_failed(engine: &'static str, message: impl std::fmt::Display) -> Self {
        Self::DisconnectionFailed {
            engine,
            message: message.to_string(),
        }
    }
}

/// Result type alias for sqldeck operations
pub type Result<T> = std::result::Result<T, SqldeckError>;
