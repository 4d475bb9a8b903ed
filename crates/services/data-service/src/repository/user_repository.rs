//! User repository implementation over the users collection.

use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::Collection;
use tracing::debug;

use common::AppResult;
use domain::{CreateUser, UpdateOutcome, UpdateProfile, User, FIELD_EMAIL, FIELD_IS_ADMIN};

use super::document::{decode, decode_all, encode, insert_error, inserted_id};
use crate::MongoConnection;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Pure store I/O: no validation and no uniqueness decisions beyond
/// reporting a store-level duplicate as `Conflict`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users in store order
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert the creation document, returning the generated id
    async fn insert(&self, user: &CreateUser) -> AppResult<String>;

    /// Set `isAdmin` on the user with this email
    async fn set_admin_flag(&self, email: &str, is_admin: bool) -> AppResult<UpdateOutcome>;

    /// Set the present profile fields on the user with this email
    async fn set_profile(&self, email: &str, profile: &UpdateProfile) -> AppResult<UpdateOutcome>;
}

/// MongoDB implementation of UserRepository
pub struct UserStore {
    connection: Arc<MongoConnection>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(connection: Arc<MongoConnection>) -> Self {
        Self { connection }
    }

    async fn collection(&self) -> AppResult<Collection<Document>> {
        Ok(self.connection.ensure_ready().await?.users)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn list(&self) -> AppResult<Vec<User>> {
        let docs: Vec<Document> = self
            .collection()
            .await?
            .find(doc! {})
            .await?
            .try_collect()
            .await?;

        Ok(decode_all(docs, "users"))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let found = self
            .collection()
            .await?
            .find_one(doc! { FIELD_EMAIL: email })
            .await?;

        found.map(decode).transpose()
    }

    async fn insert(&self, user: &CreateUser) -> AppResult<String> {
        let document = encode(user.document())?;

        match self.collection().await?.insert_one(document).await {
            Ok(result) => {
                let id = inserted_id(result.inserted_id);
                debug!(user_id = %id, "Inserted user");
                Ok(id)
            }
            Err(e) => Err(insert_error(e, "User")),
        }
    }

    async fn set_admin_flag(&self, email: &str, is_admin: bool) -> AppResult<UpdateOutcome> {
        let result = self
            .collection()
            .await?
            .update_one(
                doc! { FIELD_EMAIL: email },
                doc! { "$set": { FIELD_IS_ADMIN: is_admin } },
            )
            .await?;

        Ok(UpdateOutcome::new(result.matched_count, result.modified_count))
    }

    async fn set_profile(&self, email: &str, profile: &UpdateProfile) -> AppResult<UpdateOutcome> {
        let users = self.collection().await?;

        // `$set` rejects an empty document; with nothing to write only existence matters.
        if profile.is_empty() {
            let found = users.find_one(doc! { FIELD_EMAIL: email }).await?;
            return Ok(UpdateOutcome {
                matched: found.is_some(),
                modified: false,
            });
        }

        let update = encode(&profile.fields())?;
        let result = users
            .update_one(doc! { FIELD_EMAIL: email }, doc! { "$set": update })
            .await?;

        Ok(UpdateOutcome::new(result.matched_count, result.modified_count))
    }
}
