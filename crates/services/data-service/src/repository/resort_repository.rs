//! Resort repository implementation over the resorts collection.

use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, DateTime, Document};
use mongodb::Collection;
use tracing::debug;

use common::AppResult;
use domain::{NewResort, Resort, FIELD_CREATED_AT};

use super::document::{decode_all, encode, inserted_id};
use crate::MongoConnection;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Resort repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ResortRepository: Send + Sync {
    /// All resorts in store order
    async fn list(&self) -> AppResult<Vec<Resort>>;

    /// Insert a stamped resort, returning the generated id
    async fn insert(&self, resort: &NewResort) -> AppResult<String>;
}

/// MongoDB implementation of ResortRepository
pub struct ResortStore {
    connection: Arc<MongoConnection>,
}

impl ResortStore {
    /// Create new repository instance
    pub fn new(connection: Arc<MongoConnection>) -> Self {
        Self { connection }
    }

    async fn collection(&self) -> AppResult<Collection<Document>> {
        Ok(self.connection.ensure_ready().await?.resorts)
    }
}

#[async_trait]
impl ResortRepository for ResortStore {
    async fn list(&self) -> AppResult<Vec<Resort>> {
        let docs: Vec<Document> = self
            .collection()
            .await?
            .find(doc! {})
            .await?
            .try_collect()
            .await?;

        Ok(decode_all(docs, "resorts"))
    }

    async fn insert(&self, resort: &NewResort) -> AppResult<String> {
        let mut document = encode(resort.fields())?;
        document.insert(
            FIELD_CREATED_AT,
            DateTime::from_millis(resort.created_at().timestamp_millis()),
        );

        let result = self.collection().await?.insert_one(document).await?;
        let id = inserted_id(result.inserted_id);
        debug!(resort_id = %id, "Inserted resort");
        Ok(id)
    }
}
