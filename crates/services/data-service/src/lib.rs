//! Data Service Library
//!
//! Users and Resorts over a lazily connected MongoDB store.
//! Nothing here touches the network until the first repository call or
//! readiness check.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use crate::config::DataServiceConfig;
use crate::infra::{ConnectionManager, MongoConnector, StoreLifecycle};
use crate::repository::{ResortStore, UserStore};
use crate::service::{ResortManager, ResortService, UserManager, UserService};

/// The process-wide MongoDB connection.
pub type MongoConnection = ConnectionManager<MongoConnector>;

/// Services wired to one shared connection.
#[derive(Clone)]
pub struct DataServices {
    pub store: Arc<dyn StoreLifecycle>,
    pub users: Arc<dyn UserService>,
    pub resorts: Arc<dyn ResortService>,
}

impl DataServices {
    /// Wire repositories and services. Connecting is deferred to first use.
    pub fn new(config: DataServiceConfig) -> Self {
        let connection = Arc::new(MongoConnection::new(MongoConnector::new(config.database)));

        let user_repo = Arc::new(UserStore::new(Arc::clone(&connection)));
        let resort_repo = Arc::new(ResortStore::new(Arc::clone(&connection)));

        Self {
            store: connection,
            users: Arc::new(UserManager::new(user_repo)),
            resorts: Arc::new(ResortManager::new(resort_repo)),
        }
    }

    /// Wire from environment variables.
    pub fn from_env() -> Self {
        Self::new(DataServiceConfig::from_env())
    }
}
