//! Named connection presets

use serde::{Deserialize, Serialize};

/// A named database connection profile
///
/// Presets come from the user's config file and are immutable for the
/// process lifetime. Credential fields the file omits deserialize to empty
/// strings; the engine decides what an empty host or database means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Unique name within the loaded list
    pub name: String,

    /// Engine identifier (e.g. "mssql", "mysql")
    pub db_type: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub host: String,

    /// Database to select after connecting
    #[serde(default)]
    pub database: String,
}

impl Preset {
    /// Create a new preset for the given engine
    pub fn new(name: impl Into<String>, db_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            db_type: db_type.into(),
            username: String::new(),
            password: String::new(),
            host: String::new(),
            database: String::new(),
        }
    }

    /// Set the host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the database name
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set username and password
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }
}
