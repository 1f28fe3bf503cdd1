//! MongoDB transport configuration

use serde::{Deserialize, Serialize};

/// Connection string used when none is configured
pub const DEFAULT_CONNECTION_STRING: &str = "mongodb://127.0.0.1:27017";

/// Database used when neither the config nor the URI names one
pub const DEFAULT_DATABASE: &str = "audit";

/// MongoDB transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MongoConfig {
    /// MongoDB URI; empty selects the local default server
    pub connection_string: String,

    /// Database name; overrides the database named in the URI
    pub database: Option<String>,

    /// Collection the audit records are written to
    pub collection_name: String,

    /// Log connection and write failures
    pub debug: bool,

    /// Server selection timeout in milliseconds (driver default when unset)
    pub server_selection_timeout_ms: Option<u64>,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            connection_string: String::new(),
            database: None,
            collection_name: "auditLog".to_string(),
            debug: false,
            server_selection_timeout_ms: None,
        }
    }
}

impl MongoConfig {
    /// Config for the given URI with all other fields defaulted
    pub fn with_connection_string(uri: impl Into<String>) -> Self {
        Self {
            connection_string: uri.into(),
            ..Default::default()
        }
    }

    /// The URI to connect to, falling back to the local default
    pub fn effective_connection_string(&self) -> &str {
        if self.connection_string.trim().is_empty() {
            DEFAULT_CONNECTION_STRING
        } else {
            &self.connection_string
        }
    }
}
