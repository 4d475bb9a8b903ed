//! Application state for dependency injection.

use std::sync::Arc;

use common::AppResult;
use data_service_lib::infra::StoreLifecycle;
use data_service_lib::service::{ResortService, UserService};
use data_service_lib::DataServices;

use crate::config::GatewayConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StoreLifecycle>,
    pub users: Arc<dyn UserService>,
    pub resorts: Arc<dyn ResortService>,
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(services: DataServices, config: GatewayConfig) -> Self {
        Self {
            store: services.store,
            users: services.users,
            resorts: services.resorts,
            config,
        }
    }

    /// Wait for the shared store connection, connecting on first use.
    pub async fn store_ready(&self) -> AppResult<()> {
        self.store.ready().await
    }
}
