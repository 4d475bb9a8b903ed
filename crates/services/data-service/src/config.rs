//! Data service configuration.

use std::env;

use common::DatabaseConfig;

/// Data service configuration.
#[derive(Debug, Clone, Default)]
pub struct DataServiceConfig {
    /// Document store settings
    pub database: DatabaseConfig,
}

impl DataServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// `MONGODB_URI` wins; otherwise `DB_USER`, `DB_PASS` and `MONGODB_CLUSTER_HOST`
    /// together describe a hosted cluster.
    pub fn from_env() -> Self {
        let defaults = DatabaseConfig::default();

        let uri = env::var("MONGODB_URI")
            .ok()
            .or_else(|| {
                let user = env::var("DB_USER").ok()?;
                let pass = env::var("DB_PASS").ok()?;
                let host = env::var("MONGODB_CLUSTER_HOST").ok()?;
                Some(cluster_uri(&user, &pass, &host))
            })
            .unwrap_or(defaults.uri);

        Self {
            database: DatabaseConfig {
                uri,
                database: env::var("MONGODB_DATABASE").unwrap_or(defaults.database),
                users_collection: env::var("MONGODB_USERS_COLLECTION")
                    .unwrap_or(defaults.users_collection),
                resorts_collection: env::var("MONGODB_RESORTS_COLLECTION")
                    .unwrap_or(defaults.resorts_collection),
                app_name: env::var("MONGODB_APP_NAME").ok().or(defaults.app_name),
                server_selection_timeout_ms: env::var("MONGODB_SERVER_SELECTION_TIMEOUT_MS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(defaults.server_selection_timeout_ms),
            },
        }
    }
}

/// SRV connection string for a hosted cluster.
pub fn cluster_uri(user: &str, pass: &str, host: &str) -> String {
    format!("mongodb+srv://{user}:{pass}@{host}/?retryWrites=true&w=majority")
}
