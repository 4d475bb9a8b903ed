//! MongoDB connector.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, IndexOptions},
    Client, Collection, IndexModel,
};
use tracing::{info, warn};

use common::{AppError, AppResult, DatabaseConfig};
use domain::FIELD_EMAIL;

use super::connection::Connector;

/// The two collections resolved from the configured database.
#[derive(Clone, Debug)]
pub struct Collections {
    client: Client,
    pub users: Collection<Document>,
    pub resorts: Collection<Document>,
}

/// Connects to MongoDB and resolves the user and resort collections.
pub struct MongoConnector {
    config: DatabaseConfig,
}

impl MongoConnector {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Connector for MongoConnector {
    type Handle = Collections;

    async fn connect(&self) -> AppResult<Collections> {
        let mut options = ClientOptions::parse(&self.config.uri)
            .await
            .map_err(|e| AppError::connection(e.to_string()))?;
        options.app_name = self.config.app_name.clone();
        options.server_selection_timeout =
            Some(Duration::from_millis(self.config.server_selection_timeout_ms));

        let client =
            Client::with_options(options).map_err(|e| AppError::connection(e.to_string()))?;
        let db = client.database(&self.config.database);

        // The driver connects lazily; ping forces the round trip.
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::connection(e.to_string()))?;

        let users = db.collection::<Document>(&self.config.users_collection);
        let resorts = db.collection::<Document>(&self.config.resorts_collection);
        ensure_email_index(&users).await;

        info!(
            database = %self.config.database,
            users = %self.config.users_collection,
            resorts = %self.config.resorts_collection,
            "Connected to MongoDB"
        );

        Ok(Collections {
            client,
            users,
            resorts,
        })
    }

    async fn disconnect(&self, handle: Collections) {
        handle.client.shutdown().await;
    }
}

/// Unique index on `email`. Failure leaves the application-level check as the only guard.
async fn ensure_email_index(users: &Collection<Document>) {
    let index = IndexModel::builder()
        .keys(doc! { FIELD_EMAIL: 1 })
        .options(
            IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build(),
        )
        .build();

    if let Err(e) = users.create_index(index).await {
        warn!(error = %e, "Could not create unique email index");
    }
}
