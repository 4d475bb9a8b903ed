//! Gateway configuration.

use std::env;

use common::ServiceConfig;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Service name for logging
    pub service_name: String,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Origins allowed by CORS; empty or `*` allows any
    pub cors_allowed_origins: Vec<String>,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = ServiceConfig::default();

        Self {
            service_name: env::var("SERVICE_NAME").unwrap_or(defaults.service_name),
            host: env::var("GATEWAY_HOST")
                .or_else(|_| env::var("HOST"))
                .unwrap_or(defaults.host),
            port: env::var("GATEWAY_PORT")
                .or_else(|_| env::var("PORT"))
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_default(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        let defaults = ServiceConfig::default();
        Self {
            service_name: defaults.service_name,
            host: defaults.host,
            port: defaults.port,
            cors_allowed_origins: Vec::new(),
        }
    }
}

/// Split a comma-separated origin list.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
