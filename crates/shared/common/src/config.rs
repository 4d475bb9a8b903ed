//! Shared configuration structures.

use serde::{Deserialize, Serialize};

use domain::{DEFAULT_DATABASE, RESORTS_COLLECTION, USERS_COLLECTION};

/// Base HTTP service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "interval".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Document store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Connection string (may embed credentials, never logged)
    #[serde(skip_serializing)]
    pub uri: String,
    /// Database holding both collections
    pub database: String,
    pub users_collection: String,
    pub resorts_collection: String,
    /// Application name reported to the server
    pub app_name: Option<String>,
    /// How long a connect attempt waits for a usable server
    pub server_selection_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: DEFAULT_DATABASE.to_string(),
            users_collection: USERS_COLLECTION.to_string(),
            resorts_collection: RESORTS_COLLECTION.to_string(),
            app_name: Some("interval".to_string()),
            server_selection_timeout_ms: 5000,
        }
    }
}
